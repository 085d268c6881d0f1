// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::models::analytics::{
    CrawlOverview, IssueTypeBreakdown, ProblemPage, ResponseTimeBucket, ResponseTimeStats,
    StatusCodeCount, StatusDistribution, TopIssue,
};
use crate::domain::models::crawl::Crawl;
use crate::domain::models::issue::{issue_label, Issue, IssueSeverity, SeverityCounts};
use crate::domain::models::page::Page;
use crate::utils::stats::{mean, percent, percentile, round_to, sorted_samples};

/// 响应时间直方图桶：(标签, 上界毫秒，不含)
const RESPONSE_TIME_BUCKETS: [(&str, f64); 5] = [
    ("0-200ms", 200.0),
    ("200-500ms", 500.0),
    ("500ms-1s", 1000.0),
    ("1s-2s", 2000.0),
    ("2s+", f64::INFINITY),
];

/// 计算爬取概览
///
/// # 参数
///
/// * `crawl` - 已完成的爬取
/// * `pages` - 该爬取的全部页面
/// * `issues` - 该爬取的全部问题
/// * `slow_threshold_secs` - 慢页面阈值（秒），严格大于该值计为慢页面
pub fn overview(
    crawl: &Crawl,
    pages: &[Page],
    issues: &[Issue],
    slow_threshold_secs: f64,
) -> CrawlOverview {
    let mut severity = SeverityCounts::default();
    for issue in issues {
        severity.add(issue.severity);
    }

    let response_times = sorted_samples(pages.iter().filter_map(Page::response_time_ms));
    let word_counts: Vec<f64> = pages
        .iter()
        .filter(|p| p.word_count > 0)
        .map(|p| p.word_count as f64)
        .collect();

    let crawled_urls = pages.iter().filter(|p| p.status_code.is_some()).count() as u64;
    let indexable_pages = pages.iter().filter(|p| p.is_indexable).count() as u64;

    CrawlOverview {
        crawl_id: crawl.id,
        status: crawl.status,
        total_urls: crawl.total_urls,
        total_pages: pages.len() as u64,
        crawled_urls,
        failed_urls: pages.len() as u64 - crawled_urls,
        critical_issues: severity.critical,
        warning_issues: severity.warning,
        info_issues: severity.info,
        total_issues: severity.total(),
        avg_response_time_ms: round_to(mean(&response_times), 1),
        avg_word_count: mean(&word_counts).round(),
        indexable_pages,
        noindex_pages: pages.len() as u64 - indexable_pages,
        slow_pages: pages
            .iter()
            .filter(|p| p.response_time.map_or(false, |t| t > slow_threshold_secs))
            .count() as u64,
        images_missing_alt: pages.iter().map(|p| p.images_without_alt as i64).sum(),
        total_internal_links: pages.iter().map(|p| p.internal_links_count as i64).sum(),
        total_external_links: pages.iter().map(|p| p.external_links_count as i64).sum(),
        status_distribution: status_distribution(pages),
        started_at: crawl.started_at,
        completed_at: crawl.completed_at,
    }
}

/// 状态码按百位分桶，空状态码与 1xx 等其它状态码不计入
pub fn status_distribution(pages: &[Page]) -> StatusDistribution {
    let mut distribution = StatusDistribution::default();
    for code in pages.iter().filter_map(|p| p.status_code) {
        match code / 100 {
            2 => distribution.success += 1,
            3 => distribution.redirect += 1,
            4 => distribution.client_error += 1,
            5 => distribution.server_error += 1,
            _ => {}
        }
    }
    distribution
}

/// 响应时间统计（毫秒）
///
/// 空输入返回全零统计，桶依然全部列出。
pub fn response_time_stats(pages: &[Page]) -> ResponseTimeStats {
    let samples = sorted_samples(pages.iter().filter_map(Page::response_time_ms));

    let mut counts = [0u64; RESPONSE_TIME_BUCKETS.len()];
    for value in &samples {
        if let Some(index) = RESPONSE_TIME_BUCKETS
            .iter()
            .position(|(_, upper)| *value < *upper)
        {
            counts[index] += 1;
        }
    }

    let buckets = RESPONSE_TIME_BUCKETS
        .iter()
        .zip(counts)
        .map(|((range, _), count)| ResponseTimeBucket {
            range: range.to_string(),
            count,
        })
        .collect();

    ResponseTimeStats {
        avg: round_to(mean(&samples), 1),
        min: round_to(samples.first().copied().unwrap_or(0.0), 1),
        max: round_to(samples.last().copied().unwrap_or(0.0), 1),
        p50: round_to(percentile(&samples, 50.0), 1),
        p90: round_to(percentile(&samples, 90.0), 1),
        p95: round_to(percentile(&samples, 95.0), 1),
        total_measured: samples.len() as u64,
        buckets,
    }
}

/// 出现次数最多的问题
///
/// 按 (issue_type, severity) 分组，次数降序，其次类型升序、严重级别从高到低
pub fn top_issues(issues: &[Issue], limit: usize) -> Vec<TopIssue> {
    let mut groups: HashMap<(&str, IssueSeverity), u64> = HashMap::new();
    for issue in issues {
        *groups
            .entry((issue.issue_type.as_str(), issue.severity))
            .or_insert(0) += 1;
    }

    let mut top: Vec<TopIssue> = groups
        .into_iter()
        .map(|((issue_type, severity), count)| TopIssue {
            issue_type: issue_type.to_string(),
            severity,
            count,
            label: issue_label(issue_type),
        })
        .collect();
    top.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.issue_type.cmp(&b.issue_type))
            .then_with(|| a.severity.cmp(&b.severity))
    });
    top.truncate(limit);
    top
}

/// 按问题类型汇总各严重级别的数量
pub fn issues_by_type(issues: &[Issue]) -> Vec<IssueTypeBreakdown> {
    let mut groups: HashMap<&str, SeverityCounts> = HashMap::new();
    for issue in issues {
        groups
            .entry(issue.issue_type.as_str())
            .or_default()
            .add(issue.severity);
    }

    let mut breakdown: Vec<IssueTypeBreakdown> = groups
        .into_iter()
        .map(|(issue_type, counts)| IssueTypeBreakdown {
            issue_type: issue_type.to_string(),
            total: counts.total(),
            critical: counts.critical,
            warning: counts.warning,
            info: counts.info,
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.issue_type.cmp(&b.issue_type)));
    breakdown
}

fn status_label(code: Option<i32>) -> &'static str {
    match code.map(|c| c / 100) {
        Some(2) => "OK",
        Some(3) => "Redirect",
        Some(4) => "Client Error",
        Some(5) => "Server Error",
        _ => "Unknown",
    }
}

/// 精确状态码统计，按状态码升序，空状态码排最后
pub fn status_code_breakdown(pages: &[Page]) -> Vec<StatusCodeCount> {
    let mut counts: HashMap<Option<i32>, u64> = HashMap::new();
    for page in pages {
        *counts.entry(page.status_code).or_insert(0) += 1;
    }

    let total = pages.len() as u64;
    let mut breakdown: Vec<StatusCodeCount> = counts
        .into_iter()
        .map(|(status_code, count)| StatusCodeCount {
            status_code,
            count,
            percent: round_to(percent(count, total), 1),
            label: status_label(status_code).to_string(),
        })
        .collect();
    breakdown.sort_by_key(|entry| (entry.status_code.is_none(), entry.status_code));
    breakdown
}

/// 问题最多的页面
///
/// 问题数取自问题集合，降序排列，相同时按页面ID升序。没有问题的页面不列出。
pub fn top_problem_pages(pages: &[Page], issues: &[Issue], limit: usize) -> Vec<ProblemPage> {
    let mut per_page: HashMap<Uuid, SeverityCounts> = HashMap::new();
    for issue in issues {
        per_page.entry(issue.page_id).or_default().add(issue.severity);
    }

    let mut ranked: Vec<ProblemPage> = pages
        .iter()
        .filter_map(|page| {
            per_page.get(&page.id).map(|counts| ProblemPage {
                page_id: page.id,
                url: page.url.clone(),
                issue_count: counts.total(),
                critical: counts.critical,
                warning: counts.warning,
                info: counts.info,
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.issue_count
            .cmp(&a.issue_count)
            .then_with(|| a.page_id.cmp(&b.page_id))
    });
    ranked.truncate(limit);
    ranked
}
