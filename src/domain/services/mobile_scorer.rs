// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::models::compliance::{
    MobileIssuesPage, MobilePageResult, MobileSummary, ScoreDistribution, ScoreRating,
};
use crate::domain::models::page::Page;
use crate::domain::services::compliance_scorer::{Catalogue, ComplianceCheck};
use crate::utils::stats::round_to;

/// 移动端检查：(ID, 标签, 权重)
pub const MOBILE_CHECKS: [(&str, &str, u32); 10] = [
    ("viewport_meta", "Viewport meta tag", 15),
    ("touch_targets", "Touch targets sized for fingers", 15),
    ("media_queries", "Responsive media queries", 15),
    ("responsive_images", "Responsive images", 10),
    ("readable_font_size", "Readable font size", 10),
    ("no_horizontal_scroll", "No horizontal scrolling", 10),
    ("content_fits_viewport", "Content fits viewport", 10),
    ("no_plugins", "No browser plugins", 5),
    ("mobile_input_types", "Mobile-friendly input types", 5),
    ("no_intrusive_interstitials", "No intrusive interstitials", 5),
];

static MOBILE_CATALOGUE: Lazy<Catalogue<Page>> = Lazy::new(|| {
    let checks = MOBILE_CHECKS
        .iter()
        .map(|&(id, label, weight)| {
            ComplianceCheck::new(id, label, weight, move |page: &Page| {
                // 缺失的键视为未通过
                Some(
                    page.mobile_check()
                        .and_then(|checks| checks.get(id))
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                )
            })
        })
        .collect();
    Catalogue::new(checks).expect("mobile check weights must sum to 100")
});

/// 移动端检查目录
pub fn mobile_catalogue() -> &'static Catalogue<Page> {
    &MOBILE_CATALOGUE
}

/// 只有带 `mobile_check` 对象的页面参与移动端评分
pub fn is_mobile_eligible(page: &Page) -> bool {
    page.mobile_check().is_some()
}

/// 评估单个页面，不参与评分的页面返回 None
pub fn evaluate_page(page: &Page) -> Option<MobilePageResult> {
    if !is_mobile_eligible(page) {
        return None;
    }

    let catalogue = mobile_catalogue();
    let mobile_score = catalogue.item_score(page);
    let mobile_issues = catalogue.failed_checks(page);

    Some(MobilePageResult {
        page_id: page.id,
        url: page.url.clone(),
        mobile_score,
        rating: ScoreRating::from_score(mobile_score as f64),
        issues_count: mobile_issues.len(),
        mobile_issues,
    })
}

/// 评估爬取中所有参与评分的页面，按页面顺序返回
pub fn evaluate_pages(pages: &[Page]) -> Vec<MobilePageResult> {
    pages.iter().filter_map(evaluate_page).collect()
}

/// 项目的移动端摘要
///
/// 爬取得分为单页得分的平均值（两位小数），没有参与评分的页面时为空。
pub fn summarize(project_id: Uuid, crawl_id: Option<Uuid>, pages: &[Page]) -> MobileSummary {
    let results = evaluate_pages(pages);

    let mut score_distribution = ScoreDistribution::default();
    for result in &results {
        score_distribution.add(result.mobile_score);
    }

    let average_score = if results.is_empty() {
        None
    } else {
        let total: u64 = results.iter().map(|r| r.mobile_score as u64).sum();
        Some(round_to(total as f64 / results.len() as f64, 2))
    };

    let checks = mobile_catalogue()
        .score(pages.iter().filter(|page| is_mobile_eligible(page)))
        .outcomes;

    MobileSummary {
        project_id,
        crawl_id,
        total_pages: results.len() as u64,
        pages_with_issues: results.iter().filter(|r| r.issues_count > 0).count() as u64,
        average_score,
        rating: average_score.map(ScoreRating::from_score),
        score_distribution,
        checks,
    }
}

/// 移动端问题列表的排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileSortField {
    #[default]
    Score,
    IssuesCount,
    Url,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// 移动端问题列表的过滤与分页参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileIssueFilter {
    pub min_score: Option<u32>,
    pub max_score: Option<u32>,
    pub sort_by: MobileSortField,
    pub order: SortOrder,
    /// 从 1 开始
    pub page: u32,
    pub page_size: u32,
}

impl Default for MobileIssueFilter {
    fn default() -> Self {
        Self {
            min_score: None,
            max_score: None,
            sort_by: MobileSortField::Score,
            order: SortOrder::Asc,
            page: 1,
            page_size: 50,
        }
    }
}

/// 过滤、排序并分页移动端评估结果
///
/// `total_count` 为过滤后的总数。排序相同时按URL升序，保证分页稳定。
pub fn list_issues(
    crawl_id: Option<Uuid>,
    pages: &[Page],
    filter: &MobileIssueFilter,
) -> MobileIssuesPage {
    let mut results: Vec<MobilePageResult> = evaluate_pages(pages)
        .into_iter()
        .filter(|r| filter.min_score.map_or(true, |min| r.mobile_score >= min))
        .filter(|r| filter.max_score.map_or(true, |max| r.mobile_score <= max))
        .collect();

    results.sort_by(|a, b| {
        let primary = match filter.sort_by {
            MobileSortField::Score => a.mobile_score.cmp(&b.mobile_score),
            MobileSortField::IssuesCount => a.issues_count.cmp(&b.issues_count),
            MobileSortField::Url => a.url.cmp(&b.url),
        };
        let primary = match filter.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.url.cmp(&b.url).then(a.page_id.cmp(&b.page_id)),
            other => other,
        }
    });

    let total_count = results.len() as u64;
    let page = filter.page.max(1);
    let page_size = filter.page_size.max(1);
    let offset = (page as usize - 1).saturating_mul(page_size as usize);

    let pages = results
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();

    MobileIssuesPage {
        crawl_id,
        pages,
        total_count,
        page,
        page_size,
    }
}
