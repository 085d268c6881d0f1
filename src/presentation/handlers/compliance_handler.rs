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
        dto::analytics_request::{CrawlSelectionQuery, MobileIssuesQuery, MobilePageQuery},
        use_cases::analytics_use_case::AnalyticsUseCase,
    },
    domain::{
        models::compliance::{
            AccessibilityReport, MobileIssuesPage, MobilePageResult, MobileSummary,
        },
        repositories::{
            crawl_repository::CrawlRepository, issue_repository::IssueRepository,
            page_repository::PageRepository,
        },
    },
    presentation::errors::AppError,
};

/// 项目无障碍报告
pub async fn accessibility<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<CrawlSelectionQuery>,
) -> Result<Json<AccessibilityReport>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.accessibility(project_id, query).await?))
}

/// 项目移动端评分摘要
pub async fn mobile_summary<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<CrawlSelectionQuery>,
) -> Result<Json<MobileSummary>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.mobile_summary(project_id, query).await?))
}

/// 移动端问题页面列表，支持过滤、排序和分页
pub async fn mobile_issues<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<MobileIssuesQuery>,
) -> Result<Json<MobileIssuesPage>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.mobile_issues(project_id, query).await?))
}

pub async fn mobile_page<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
    Query(query): Query<MobilePageQuery>,
) -> Result<Json<MobilePageResult>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.mobile_page(crawl_id, query).await?))
}
