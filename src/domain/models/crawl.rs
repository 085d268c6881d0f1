// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 爬取运行实体
///
/// 表示某个项目的一次完整（或进行中的）爬取运行，包含运行状态、
/// URL 统计、按严重级别汇总的问题数以及生命周期时间戳。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crawl {
    /// 爬取运行唯一标识符
    pub id: Uuid,
    /// 所属项目ID
    pub project_id: Uuid,
    /// 爬取状态
    pub status: CrawlStatus,
    /// 发现的URL总数
    pub total_urls: i32,
    /// 成功抓取的URL数
    pub crawled_urls: i32,
    /// 抓取失败的URL数
    pub failed_urls: i32,
    /// 严重问题数
    pub critical_issues: i32,
    /// 警告问题数
    pub warning_issues: i32,
    /// 提示问题数
    pub info_issues: i32,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 开始时间
    pub started_at: Option<DateTime<Utc>>,
    /// 完成时间（未完成的运行没有该值）
    pub completed_at: Option<DateTime<Utc>>,
    /// 失败原因
    pub error_message: Option<String>,
}

impl Crawl {
    /// 问题总数
    pub fn total_issues(&self) -> i32 {
        self.critical_issues + self.warning_issues + self.info_issues
    }

    /// 是否已完成，只有已完成的运行才能参与统计、评分和对比
    pub fn is_completed(&self) -> bool {
        self.status == CrawlStatus::Completed
    }
}

/// 爬取状态枚举
///
/// 状态转换遵循以下流程：
/// Pending → Running → Completed/Failed/Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrawlStatus {
    /// 等待中
    #[default]
    Pending,
    /// 运行中
    Running,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
    /// 已取消
    Cancelled,
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrawlStatus::Pending => write!(f, "pending"),
            CrawlStatus::Running => write!(f, "running"),
            CrawlStatus::Completed => write!(f, "completed"),
            CrawlStatus::Failed => write!(f, "failed"),
            CrawlStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 从字符串解析爬取状态
///
/// 用于从数据库中恢复状态值
impl FromStr for CrawlStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CrawlStatus::Pending),
            "running" => Ok(CrawlStatus::Running),
            "completed" => Ok(CrawlStatus::Completed),
            "failed" => Ok(CrawlStatus::Failed),
            "cancelled" => Ok(CrawlStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 项目爬取列表中的摘要条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrawlSummary {
    pub id: Uuid,
    pub status: CrawlStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub url_count: i32,
    pub issue_count: i32,
    pub critical_issues: i32,
    pub warning_issues: i32,
    pub info_issues: i32,
}

impl From<&Crawl> for CrawlSummary {
    fn from(crawl: &Crawl) -> Self {
        Self {
            id: crawl.id,
            status: crawl.status,
            started_at: crawl.started_at,
            completed_at: crawl.completed_at,
            url_count: crawl.crawled_urls,
            issue_count: crawl.total_issues(),
            critical_issues: crawl.critical_issues,
            warning_issues: crawl.warning_issues,
            info_issues: crawl.info_issues,
        }
    }
}
