// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::analytics_request::TrendQuery, use_cases::analytics_use_case::AnalyticsUseCase,
    },
    domain::{
        models::{crawl::CrawlSummary, diff::CrawlDiff, trend::ProjectTrend},
        repositories::{
            crawl_repository::CrawlRepository, issue_repository::IssueRepository,
            page_repository::PageRepository,
        },
    },
    presentation::errors::AppError,
};

/// 对比两次爬取，第一个ID为基线
pub async fn compare<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path((crawl_a, crawl_b)): Path<(Uuid, Uuid)>,
) -> Result<Json<CrawlDiff>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.compare(crawl_a, crawl_b).await?))
}

/// 项目问题趋势
pub async fn trend<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<ProjectTrend>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.trend(project_id, query).await?))
}

/// 项目的爬取列表
pub async fn crawls<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<CrawlSummary>>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.crawls(project_id).await?))
}
