// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

/// 健康检查和版本端点
#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/v1/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "crawlsight");
}

/// 已完成爬取的概览
#[tokio::test]
async fn test_overview_of_completed_crawl() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/crawls/{}/analytics/overview", app.seed.crawl_b))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["status_distribution"]["2xx"], 2);
    assert_eq!(body["status_distribution"]["5xx"], 1);
    assert_eq!(body["critical_issues"], 1);
    assert_eq!(body["warning_issues"], 1);
}

/// 运行中的爬取返回占位响应
#[tokio::test]
async fn test_running_crawl_returns_not_ready_placeholder() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!(
            "/v1/crawls/{}/analytics/response-times",
            app.seed.running_crawl
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["status"], "running");
    assert_eq!(body["crawl_id"], app.seed.running_crawl.to_string());
}

/// 未知爬取返回 404
#[tokio::test]
async fn test_unknown_crawl_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/crawls/{}/analytics/overview", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// Top-N 参数超出范围返回 400
#[tokio::test]
async fn test_top_issues_limit_validation() {
    let app = create_test_app().await;
    let path = format!("/v1/crawls/{}/analytics/top-issues", app.seed.crawl_b);

    let response = app.server.get(&path).add_query_param("limit", 0).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app.server.get(&path).add_query_param("limit", 1).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["issue_type"], "images_missing_alt");
    assert_eq!(body[0]["severity"], "warning");
}

/// 问题最多的页面使用实际问题数
#[tokio::test]
async fn test_top_pages_and_status_codes() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/crawls/{}/analytics/top-pages", app.seed.crawl_a))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .server
        .get(&format!("/v1/crawls/{}/analytics/status-codes", app.seed.crawl_a))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body[0]["status_code"], 200);
    assert_eq!(body[0]["count"], 2);
}

/// 对比同一项目的两次爬取
#[tokio::test]
async fn test_compare_crawls() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/compare/{}/{}", app.seed.crawl_a, app.seed.crawl_b))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["summary"]["fixed_issues"], 1);
    assert_eq!(body["summary"]["new_issues"], 0);
    assert_eq!(body["new_urls"][0], "https://example.com/new");
    assert_eq!(body["removed_urls"][0], "https://example.com/old");
    assert_eq!(body["fixed_issues"][0]["issue_type"], "missing_title");
}

/// 与运行中的爬取对比返回占位响应
#[tokio::test]
async fn test_compare_with_running_crawl_returns_not_ready_placeholder() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!(
            "/v1/compare/{}/{}",
            app.seed.crawl_a, app.seed.running_crawl
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["status"], "running");
    assert_eq!(body["crawl_id"], app.seed.running_crawl.to_string());
}

/// 跨项目对比被拒绝
#[tokio::test]
async fn test_compare_across_projects_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!(
            "/v1/compare/{}/{}",
            app.seed.crawl_a, app.seed.other_crawl
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// 趋势只包含已完成的爬取，按时间升序
#[tokio::test]
async fn test_project_trend() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/projects/{}/trend", app.seed.project_id))
        .add_query_param("limit", 10)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["crawl_id"], app.seed.crawl_a.to_string());
    assert_eq!(points[1]["crawl_id"], app.seed.crawl_b.to_string());

    let response = app
        .server
        .get(&format!("/v1/projects/{}/trend", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 项目爬取列表包含所有状态
#[tokio::test]
async fn test_project_crawls() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/projects/{}/crawls", app.seed.project_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 3);
}

/// 无障碍报告使用最新的已完成爬取
#[tokio::test]
async fn test_accessibility_uses_latest_completed_crawl() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/projects/{}/accessibility", app.seed.project_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["crawl_id"], app.seed.crawl_b.to_string());
    assert_eq!(body["issues_by_level"]["A"], 1);
    assert!(body["bfsg_checklist"].is_object());

    let response = app
        .server
        .get(&format!(
            "/v1/projects/{}/accessibility",
            app.seed.empty_project_id
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["crawl_id"].is_null());
    assert!(body["message"].is_string());
}

/// 移动端摘要与问题列表
#[tokio::test]
async fn test_mobile_summary_and_issues() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/projects/{}/mobile/summary", app.seed.project_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["pages_with_issues"], 3);
    assert_eq!(body["average_score"], 95.0);

    let response = app
        .server
        .get(&format!("/v1/projects/{}/mobile/issues", app.seed.project_id))
        .add_query_param("sort_by", "url")
        .add_query_param("page_size", 2)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["pages"].as_array().unwrap().len(), 2);
    assert_eq!(body["pages"][0]["url"], "https://example.com/");

    let response = app
        .server
        .get(&format!("/v1/projects/{}/mobile/issues", app.seed.project_id))
        .add_query_param("page_size", 500)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 单页移动端评估按规范化URL匹配
#[tokio::test]
async fn test_mobile_page_lookup() {
    let app = create_test_app().await;
    let path = format!("/v1/crawls/{}/mobile/page", app.seed.crawl_b);

    let response = app
        .server
        .get(&path)
        .add_query_param("url", "https://EXAMPLE.com/x")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com/x/");
    assert_eq!(body["mobile_score"], 95);

    let response = app
        .server
        .get(&path)
        .add_query_param("url", "https://example.com/missing")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 站点地图只包含可索引的 200 页面
#[tokio::test]
async fn test_sitemap() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/crawls/{}/sitemap.xml", app.seed.crawl_b))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let xml = response.text();
    assert!(xml.contains("<loc>https://example.com/</loc>"));
    assert!(xml.contains("<loc>https://example.com/x/</loc>"));
    assert!(!xml.contains("https://example.com/new"));
}
