// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    application::{
        dto::analytics_request::TopNQuery, use_cases::analytics_use_case::AnalyticsUseCase,
    },
    domain::{
        models::analytics::{
            CrawlOverview, IssueTypeBreakdown, ProblemPage, ResponseTimeStats, StatusCodeCount,
            TopIssue, WebVitalsSummary,
        },
        repositories::{
            crawl_repository::CrawlRepository, issue_repository::IssueRepository,
            page_repository::PageRepository,
        },
    },
    presentation::errors::AppError,
};

/// 爬取概览
pub async fn overview<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<Json<CrawlOverview>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.overview(crawl_id).await?))
}

/// 响应时间统计
pub async fn response_times<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<Json<ResponseTimeStats>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.response_times(crawl_id).await?))
}

/// 高频问题
pub async fn top_issues<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
    Query(query): Query<TopNQuery>,
) -> Result<Json<Vec<TopIssue>>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.top_issues(crawl_id, query).await?))
}

pub async fn issues_by_type<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<Json<Vec<IssueTypeBreakdown>>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.issues_by_type(crawl_id).await?))
}

pub async fn status_codes<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<Json<Vec<StatusCodeCount>>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.status_codes(crawl_id).await?))
}

/// 问题最多的页面
pub async fn top_pages<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
    Query(query): Query<TopNQuery>,
) -> Result<Json<Vec<ProblemPage>>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.top_pages(crawl_id, query).await?))
}

pub async fn web_vitals<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<Json<WebVitalsSummary>, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    Ok(Json(use_case.web_vitals(crawl_id).await?))
}

/// XML 站点地图
pub async fn sitemap<CR, PR, IR>(
    Extension(use_case): Extension<Arc<AnalyticsUseCase<CR, PR, IR>>>,
    Path(crawl_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    let xml = use_case.sitemap(crawl_id).await?;
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}
