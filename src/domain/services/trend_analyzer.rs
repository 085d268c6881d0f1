// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::domain::models::crawl::Crawl;
use crate::domain::models::trend::{ProjectTrend, TrendDirection, TrendPoint};

/// 构建项目趋势
///
/// 只使用带完成时间的已完成爬取，按完成时间从旧到新排列，每次爬取一个点，
/// 不做平滑也不补点。
pub fn build_trend(project_id: Uuid, crawls: &[Crawl]) -> ProjectTrend {
    let mut points: Vec<TrendPoint> = crawls
        .iter()
        .filter(|crawl| crawl.is_completed())
        .filter_map(|crawl| {
            crawl.completed_at.map(|completed_at| TrendPoint {
                crawl_id: crawl.id,
                completed_at,
                total_pages: crawl.crawled_urls,
                critical_issues: crawl.critical_issues,
                warning_issues: crawl.warning_issues,
                info_issues: crawl.info_issues,
                total_issues: crawl.total_issues(),
            })
        })
        .collect();
    points.sort_by(|a, b| {
        a.completed_at
            .cmp(&b.completed_at)
            .then_with(|| a.crawl_id.cmp(&b.crawl_id))
    });

    let direction = direction(&points);
    ProjectTrend {
        project_id,
        points,
        direction,
    }
}

/// 比较首尾两个点的问题总数
pub fn direction(points: &[TrendPoint]) -> TrendDirection {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => {
            match last.total_issues.cmp(&first.total_issues) {
                Ordering::Less => TrendDirection::Improving,
                Ordering::Greater => TrendDirection::Degrading,
                Ordering::Equal => TrendDirection::Stable,
            }
        }
        _ => TrendDirection::Stable,
    }
}
