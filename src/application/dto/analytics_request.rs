// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::services::mobile_scorer::{MobileIssueFilter, MobileSortField, SortOrder};

/// Top-N 查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct TopNQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

/// 趋势查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct TrendQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

/// 指定爬取的查询参数，不指定时使用项目最新的已完成爬取
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CrawlSelectionQuery {
    pub crawl_id: Option<Uuid>,
}

/// 移动端问题列表查询参数
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct MobileIssuesQuery {
    pub crawl_id: Option<Uuid>,
    #[validate(range(min = 0, max = 100))]
    pub min_score: Option<u32>,
    #[validate(range(min = 0, max = 100))]
    pub max_score: Option<u32>,
    pub sort_by: Option<MobileSortField>,
    pub order: Option<SortOrder>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 200))]
    pub page_size: Option<u32>,
}

impl MobileIssuesQuery {
    /// 转换为过滤参数，未指定的字段使用默认值
    pub fn to_filter(&self) -> MobileIssueFilter {
        let defaults = MobileIssueFilter::default();
        MobileIssueFilter {
            min_score: self.min_score,
            max_score: self.max_score,
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            order: self.order.unwrap_or(defaults.order),
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// 单页移动端评估查询参数
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct MobilePageQuery {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}
