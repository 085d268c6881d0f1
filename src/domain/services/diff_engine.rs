// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::config::settings::UrlNormalizationSettings;
use crate::domain::models::crawl::Crawl;
use crate::domain::models::diff::{
    CrawlDiff, CrawlSnapshot, DiffSummary, IssueDelta, PerformanceChange, StatusChange,
    TitleChange,
};
use crate::domain::models::issue::{Issue, IssueSeverity};
use crate::domain::models::page::Page;
use crate::utils::url_utils::normalize_url;

/// 参与对比的一次爬取及其页面和问题
#[derive(Debug, Clone, Copy)]
pub struct CrawlData<'a> {
    pub crawl: &'a Crawl,
    pub pages: &'a [Page],
    pub issues: &'a [Issue],
}

/// 对比选项
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub normalization: UrlNormalizationSettings,
    /// 每个明细列表的最大长度，摘要计数不受影响
    pub list_limit: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            normalization: UrlNormalizationSettings::default(),
            list_limit: 500,
        }
    }
}

/// 规范化URL相同的页面合并后的视图
struct MergedPage<'a> {
    /// ID最小的页面，提供页面属性
    page: &'a Page,
    /// 问题类型 → 最高严重级别
    issue_types: HashMap<&'a str, IssueSeverity>,
    issue_total: u64,
}

fn index_crawl<'a>(
    data: &CrawlData<'a>,
    options: &DiffOptions,
) -> BTreeMap<String, MergedPage<'a>> {
    let mut ordered: Vec<&'a Page> = data.pages.iter().collect();
    ordered.sort_by_key(|page| page.id);

    let mut merged: BTreeMap<String, MergedPage<'a>> = BTreeMap::new();
    let mut key_by_page: HashMap<Uuid, String> = HashMap::new();
    for page in ordered {
        let key = normalize_url(&page.url, &options.normalization);
        key_by_page.insert(page.id, key.clone());
        merged.entry(key).or_insert_with(|| MergedPage {
            page,
            issue_types: HashMap::new(),
            issue_total: 0,
        });
    }

    for issue in data.issues {
        let Some(entry) = key_by_page.get(&issue.page_id).and_then(|key| merged.get_mut(key))
        else {
            continue;
        };
        entry.issue_total += 1;
        entry
            .issue_types
            .entry(issue.issue_type.as_str())
            .and_modify(|severity| *severity = (*severity).min(issue.severity))
            .or_insert(issue.severity);
    }

    merged
}

/// 标题规范化：去除首尾空白并合并连续空白，缺失视为空字符串
pub fn normalize_title(title: Option<&str>) -> String {
    title
        .map(|t| t.split_whitespace().collect::<Vec<&str>>().join(" "))
        .unwrap_or_default()
}

/// 对比两次爬取，A 为较早的一次，B 为较新的一次
///
/// URL 按规范化键划分为新增、移除和共同三部分，其余所有计算都基于该划分。
/// 新增和移除页面上的问题不计入新增/修复问题，单独以计数形式给出。
pub fn diff_crawls(a: CrawlData<'_>, b: CrawlData<'_>, options: &DiffOptions) -> CrawlDiff {
    let index_a = index_crawl(&a, options);
    let index_b = index_crawl(&b, options);

    let mut new_urls = Vec::new();
    let mut new_page_issues = 0u64;
    for (key, merged) in &index_b {
        if !index_a.contains_key(key) {
            new_urls.push(merged.page.url.clone());
            new_page_issues += merged.issue_total;
        }
    }

    let mut removed_urls = Vec::new();
    let mut removed_page_issues = 0u64;
    for (key, merged) in &index_a {
        if !index_b.contains_key(key) {
            removed_urls.push(merged.page.url.clone());
            removed_page_issues += merged.issue_total;
        }
    }

    let mut summary = DiffSummary {
        new_urls: new_urls.len() as u64,
        removed_urls: removed_urls.len() as u64,
        ..Default::default()
    };
    let mut new_issues = Vec::new();
    let mut fixed_issues = Vec::new();
    let mut status_changes = Vec::new();
    let mut title_changes = Vec::new();
    let mut performance_changes = Vec::new();

    for (key, old) in &index_a {
        let Some(new) = index_b.get(key) else {
            continue;
        };
        let url = &new.page.url;

        if old.page.status_code != new.page.status_code {
            status_changes.push(StatusChange {
                url: url.clone(),
                old_status: old.page.status_code,
                new_status: new.page.status_code,
            });
        }

        let old_title = normalize_title(old.page.title.as_deref());
        let new_title = normalize_title(new.page.title.as_deref());
        if old_title != new_title {
            title_changes.push(TitleChange {
                url: url.clone(),
                old: old_title,
                new: new_title,
            });
        }

        if let (Some(old_score), Some(new_score)) =
            (old.page.performance_score(), new.page.performance_score())
        {
            if old_score != new_score {
                performance_changes.push(PerformanceChange {
                    url: url.clone(),
                    old_score,
                    new_score,
                });
            }
        }

        for (issue_type, severity) in &old.issue_types {
            if !new.issue_types.contains_key(issue_type) {
                fixed_issues.push(IssueDelta {
                    url: url.clone(),
                    issue_type: issue_type.to_string(),
                    severity: *severity,
                });
            }
        }
        for (issue_type, severity) in &new.issue_types {
            if !old.issue_types.contains_key(issue_type) {
                new_issues.push(IssueDelta {
                    url: url.clone(),
                    issue_type: issue_type.to_string(),
                    severity: *severity,
                });
            }
        }

        if new.issue_total < old.issue_total {
            summary.improved_pages += 1;
        } else if new.issue_total > old.issue_total {
            summary.degraded_pages += 1;
        }
    }

    summary.fixed_issues = fixed_issues.len() as u64;
    summary.new_issues = new_issues.len() as u64;

    let limit = options.list_limit;
    new_urls.sort();
    new_urls.truncate(limit);
    removed_urls.sort();
    removed_urls.truncate(limit);
    sort_deltas(&mut new_issues, limit);
    sort_deltas(&mut fixed_issues, limit);
    status_changes.sort_by(|x, y| x.url.cmp(&y.url));
    status_changes.truncate(limit);
    title_changes.sort_by(|x, y| x.url.cmp(&y.url));
    title_changes.truncate(limit);
    performance_changes.sort_by(|x, y| {
        let dx = (x.new_score - x.old_score).abs();
        let dy = (y.new_score - y.old_score).abs();
        dy.total_cmp(&dx).then_with(|| x.url.cmp(&y.url))
    });
    performance_changes.truncate(limit);

    CrawlDiff {
        crawl_a: CrawlSnapshot::from(a.crawl),
        crawl_b: CrawlSnapshot::from(b.crawl),
        summary,
        new_urls,
        removed_urls,
        new_issues,
        fixed_issues,
        status_changes,
        title_changes,
        performance_changes,
        new_page_issues,
        removed_page_issues,
    }
}

fn sort_deltas(deltas: &mut Vec<IssueDelta>, limit: usize) {
    deltas.sort_by(|x, y| {
        x.url
            .cmp(&y.url)
            .then_with(|| x.issue_type.cmp(&y.issue_type))
    });
    deltas.truncate(limit);
}
