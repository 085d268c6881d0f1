// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crawl::Crawl;
use super::issue::IssueSeverity;

/// 两次爬取的对比结果
///
/// 每次请求重新计算，不会持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlDiff {
    pub crawl_a: CrawlSnapshot,
    pub crawl_b: CrawlSnapshot,
    pub summary: DiffSummary,
    pub new_urls: Vec<String>,
    pub removed_urls: Vec<String>,
    pub new_issues: Vec<IssueDelta>,
    pub fixed_issues: Vec<IssueDelta>,
    pub status_changes: Vec<StatusChange>,
    pub title_changes: Vec<TitleChange>,
    pub performance_changes: Vec<PerformanceChange>,
    /// 新增页面上的问题数，不计入 new_issues
    pub new_page_issues: u64,
    /// 已移除页面上的问题数，不计入 fixed_issues
    pub removed_page_issues: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    pub id: Uuid,
    pub completed_at: Option<DateTime<Utc>>,
    pub url_count: i32,
    pub issue_count: i32,
    pub critical_issues: i32,
}

impl From<&Crawl> for CrawlSnapshot {
    fn from(crawl: &Crawl) -> Self {
        Self {
            id: crawl.id,
            completed_at: crawl.completed_at,
            url_count: crawl.crawled_urls,
            issue_count: crawl.total_issues(),
            critical_issues: crawl.critical_issues,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub new_urls: u64,
    pub removed_urls: u64,
    pub fixed_issues: u64,
    pub new_issues: u64,
    pub improved_pages: u64,
    pub degraded_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDelta {
    pub url: String,
    pub issue_type: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub url: String,
    pub old_status: Option<i32>,
    pub new_status: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleChange {
    pub url: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceChange {
    pub url: String,
    pub old_score: f64,
    pub new_score: f64,
}
