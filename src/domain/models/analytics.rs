// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crawl::CrawlStatus;
use super::issue::IssueSeverity;

/// 状态码分布（按百位分桶）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    #[serde(rename = "2xx")]
    pub success: u64,
    #[serde(rename = "3xx")]
    pub redirect: u64,
    #[serde(rename = "4xx")]
    pub client_error: u64,
    #[serde(rename = "5xx")]
    pub server_error: u64,
}

impl StatusDistribution {
    pub fn total(&self) -> u64 {
        self.success + self.redirect + self.client_error + self.server_error
    }
}

/// 爬取概览
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrawlOverview {
    pub crawl_id: Uuid,
    pub status: CrawlStatus,
    pub total_urls: i32,
    pub total_pages: u64,
    pub crawled_urls: u64,
    pub failed_urls: u64,
    pub critical_issues: u64,
    pub warning_issues: u64,
    pub info_issues: u64,
    pub total_issues: u64,
    pub avg_response_time_ms: f64,
    pub avg_word_count: f64,
    pub indexable_pages: u64,
    pub noindex_pages: u64,
    pub slow_pages: u64,
    pub images_missing_alt: i64,
    pub total_internal_links: i64,
    pub total_external_links: i64,
    pub status_distribution: StatusDistribution,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// 响应时间直方图桶
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeBucket {
    pub range: String,
    pub count: u64,
}

/// 响应时间统计（毫秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub total_measured: u64,
    pub buckets: Vec<ResponseTimeBucket>,
}

/// 高频问题条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopIssue {
    pub issue_type: String,
    pub severity: IssueSeverity,
    pub count: u64,
    pub label: String,
}

/// 按问题类型汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeBreakdown {
    pub issue_type: String,
    pub total: u64,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

/// 精确状态码统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCodeCount {
    pub status_code: Option<i32>,
    pub count: u64,
    pub percent: f64,
    pub label: String,
}

/// 问题最多的页面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemPage {
    pub page_id: Uuid,
    pub url: String,
    pub issue_count: u64,
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

/// Core Web Vitals 单项评级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
    Unknown,
}

/// 单页的 Core Web Vitals 评级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageVitals {
    pub lcp: VitalRating,
    pub cls: VitalRating,
    pub fcp: VitalRating,
    pub ttfb: VitalRating,
    pub overall: VitalRating,
}

/// 爬取级别的 Core Web Vitals 汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebVitalsSummary {
    pub crawl_id: Uuid,
    pub measured_pages: u64,
    pub good: u64,
    pub needs_improvement: u64,
    pub poor: u64,
    pub p75_lcp_ms: Option<f64>,
    pub p75_cls: Option<f64>,
    pub p75_fcp_ms: Option<f64>,
    pub p75_ttfb_ms: Option<f64>,
}
