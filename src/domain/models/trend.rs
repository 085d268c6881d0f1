// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 趋势中的一个数据点，对应一次已完成的爬取
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub crawl_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub total_pages: i32,
    pub critical_issues: i32,
    pub warning_issues: i32,
    pub info_issues: i32,
    pub total_issues: i32,
}

/// 问题总数的变化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Degrading,
    Stable,
}

/// 项目趋势
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTrend {
    pub project_id: Uuid,
    pub points: Vec<TrendPoint>,
    pub direction: TrendDirection,
}
