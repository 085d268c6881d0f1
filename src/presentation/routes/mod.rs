// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::analytics_use_case::AnalyticsUseCase;
use crate::config::settings::Settings;
use crate::domain::repositories::{
    crawl_repository::CrawlRepository, issue_repository::IssueRepository,
    page_repository::PageRepository,
};
use crate::infrastructure::repositories::{
    crawl_repo_impl::CrawlRepositoryImpl, issue_repo_impl::IssueRepositoryImpl,
    page_repo_impl::PageRepositoryImpl,
};
use crate::presentation::handlers::{analytics_handler, compliance_handler, project_handler};
use axum::{routing::get, Extension, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 使用数据库仓库装配完整的应用路由
pub fn app(db: Arc<DatabaseConnection>, settings: &Settings) -> Router {
    let use_case = AnalyticsUseCase::new(
        Arc::new(CrawlRepositoryImpl::new(db.clone())),
        Arc::new(PageRepositoryImpl::new(
            db.clone(),
            settings.analytics.max_pages_per_request,
        )),
        Arc::new(IssueRepositoryImpl::new(
            db,
            settings.analytics.max_issues_per_request,
        )),
        settings.analytics.clone(),
        settings.url_normalization.clone(),
    );
    routes(Arc::new(use_case))
}

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 分析用例，通过 Extension 注入各处理器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<CR, PR, IR>(use_case: Arc<AnalyticsUseCase<CR, PR, IR>>) -> Router
where
    CR: CrawlRepository + 'static,
    PR: PageRepository + 'static,
    IR: IssueRepository + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let crawl_routes = Router::new()
        .route(
            "/v1/crawls/{id}/analytics/overview",
            get(analytics_handler::overview::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/response-times",
            get(analytics_handler::response_times::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/top-issues",
            get(analytics_handler::top_issues::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/issues-by-type",
            get(analytics_handler::issues_by_type::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/status-codes",
            get(analytics_handler::status_codes::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/top-pages",
            get(analytics_handler::top_pages::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/analytics/web-vitals",
            get(analytics_handler::web_vitals::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/sitemap.xml",
            get(analytics_handler::sitemap::<CR, PR, IR>),
        )
        .route(
            "/v1/crawls/{id}/mobile/page",
            get(compliance_handler::mobile_page::<CR, PR, IR>),
        );

    let project_routes = Router::new()
        .route(
            "/v1/projects/{id}/accessibility",
            get(compliance_handler::accessibility::<CR, PR, IR>),
        )
        .route(
            "/v1/projects/{id}/mobile/summary",
            get(compliance_handler::mobile_summary::<CR, PR, IR>),
        )
        .route(
            "/v1/projects/{id}/mobile/issues",
            get(compliance_handler::mobile_issues::<CR, PR, IR>),
        )
        .route(
            "/v1/projects/{id}/trend",
            get(project_handler::trend::<CR, PR, IR>),
        )
        .route(
            "/v1/projects/{id}/crawls",
            get(project_handler::crawls::<CR, PR, IR>),
        )
        .route(
            "/v1/compare/{a}/{b}",
            get(project_handler::compare::<CR, PR, IR>),
        );

    Router::new()
        .merge(public_routes)
        .merge(crawl_routes)
        .merge(project_routes)
        .layer(Extension(use_case))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
