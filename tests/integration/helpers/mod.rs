// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use crawlsight::config::settings::Settings;
use crawlsight::infrastructure::database::entities::{crawl, issue, page, project};
use crawlsight::presentation::routes;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Set,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// 测试数据中各实体的ID
#[allow(dead_code)]
pub struct Seed {
    pub project_id: Uuid,
    pub other_project_id: Uuid,
    pub empty_project_id: Uuid,
    /// 两天前完成的基线爬取
    pub crawl_a: Uuid,
    /// 最新完成的爬取
    pub crawl_b: Uuid,
    pub running_crawl: Uuid,
    pub other_crawl: Uuid,
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db_pool: Arc<DatabaseConnection>,
    pub seed: Seed,
}

/// 创建内存数据库并按实体建表
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let statements = [
        schema.create_table_from_entity(project::Entity),
        schema.create_table_from_entity(crawl::Entity),
        schema.create_table_from_entity(page::Entity),
        schema.create_table_from_entity(issue::Entity),
    ];
    for stmt in statements.iter() {
        db.execute(backend.build(stmt)).await.unwrap();
    }

    Arc::new(db)
}

pub async fn insert_project(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    project::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        root_url: Set("https://example.com".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn insert_crawl(
    db: &DatabaseConnection,
    project_id: Uuid,
    status: &str,
    completed_at: Option<DateTime<Utc>>,
    issues: (i32, i32, i32),
) -> Uuid {
    let id = Uuid::new_v4();
    let created_at = completed_at.unwrap_or_else(Utc::now) - Duration::hours(1);
    crawl::ActiveModel {
        id: Set(id),
        project_id: Set(project_id),
        status: Set(status.to_string()),
        total_urls: Set(3),
        crawled_urls: Set(3),
        failed_urls: Set(0),
        critical_issues: Set(issues.0),
        warning_issues: Set(issues.1),
        info_issues: Set(issues.2),
        created_at: Set(created_at.into()),
        started_at: Set(Some(created_at.into())),
        completed_at: Set(completed_at.map(Into::into)),
        error_message: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn insert_page(
    db: &DatabaseConnection,
    crawl_id: Uuid,
    url: &str,
    status_code: i32,
    response_time: f64,
    depth: i32,
) -> Uuid {
    let id = Uuid::new_v4();
    page::ActiveModel {
        id: Set(id),
        crawl_id: Set(crawl_id),
        url: Set(url.to_string()),
        status_code: Set(Some(status_code)),
        content_type: Set(Some("text/html; charset=utf-8".to_string())),
        response_time: Set(Some(response_time)),
        title: Set(Some(format!("Title of {}", url))),
        meta_description: Set(None),
        h1: Set(None),
        word_count: Set(400),
        internal_links_count: Set(5),
        external_links_count: Set(1),
        images_without_alt: Set(0),
        is_indexable: Set(true),
        depth: Set(depth),
        crawled_at: Set(Some(Utc::now().into())),
        extensions: Set(Some(json!({
            "performance_score": 80,
            "mobile_check": {
                "viewport_meta": true,
                "touch_targets": true,
                "media_queries": true,
                "responsive_images": true,
                "readable_font_size": true,
                "no_horizontal_scroll": true,
                "content_fits_viewport": true,
                "no_plugins": true,
                "mobile_input_types": true,
                "no_intrusive_interstitials": false
            }
        }))),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn insert_issue(
    db: &DatabaseConnection,
    crawl_id: Uuid,
    page_id: Uuid,
    issue_type: &str,
    severity: &str,
    category: Option<&str>,
) -> Uuid {
    let id = Uuid::new_v4();
    issue::ActiveModel {
        id: Set(id),
        crawl_id: Set(crawl_id),
        page_id: Set(page_id),
        severity: Set(severity.to_string()),
        issue_type: Set(issue_type.to_string()),
        description: Set(format!("{} detected", issue_type)),
        recommendation: Set(None),
        category: Set(category.map(str::to_string)),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

/// 写入两次已完成爬取、一次运行中爬取以及另一个项目的爬取
pub async fn seed(db: &DatabaseConnection) -> Seed {
    let now = Utc::now();
    let project_id = insert_project(db, "example").await;
    let other_project_id = insert_project(db, "other").await;
    let empty_project_id = insert_project(db, "empty").await;

    let crawl_a = insert_crawl(db, project_id, "completed", Some(now - Duration::days(2)), (1, 1, 0)).await;
    let crawl_b = insert_crawl(db, project_id, "completed", Some(now), (1, 1, 0)).await;
    let running_crawl = insert_crawl(db, project_id, "running", None, (0, 0, 0)).await;
    let other_crawl = insert_crawl(db, other_project_id, "completed", Some(now), (0, 0, 0)).await;

    // crawl A: /x 缺少标题，首页缺少图片 alt，/old 已失效
    let home_a = insert_page(db, crawl_a, "https://example.com/", 200, 0.1, 0).await;
    let x_a = insert_page(db, crawl_a, "https://example.com/x", 200, 0.3, 1).await;
    insert_page(db, crawl_a, "https://example.com/old", 404, 0.05, 1).await;
    insert_issue(db, crawl_a, x_a, "missing_title", "critical", Some("seo")).await;
    insert_issue(db, crawl_a, home_a, "images_missing_alt", "warning", Some("accessibility")).await;

    // crawl B: /x 已修复，新增 /new 返回 500
    let home_b = insert_page(db, crawl_b, "https://example.com/", 200, 0.15, 0).await;
    insert_page(db, crawl_b, "https://example.com/x/", 200, 0.25, 1).await;
    let new_b = insert_page(db, crawl_b, "https://example.com/new", 500, 2.5, 2).await;
    insert_issue(db, crawl_b, home_b, "images_missing_alt", "warning", Some("accessibility")).await;
    insert_issue(db, crawl_b, new_b, "server_error", "critical", None).await;

    insert_page(db, other_crawl, "https://other.example/", 200, 0.2, 0).await;

    Seed {
        project_id,
        other_project_id,
        empty_project_id,
        crawl_a,
        crawl_b,
        running_crawl,
        other_crawl,
    }
}

pub async fn create_test_app() -> TestApp {
    let db_pool = setup_db().await;
    let seed = seed(db_pool.as_ref()).await;

    let settings = Settings::defaults().unwrap();
    let app = routes::app(db_pool.clone(), &settings);
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        db_pool,
        seed,
    }
}
