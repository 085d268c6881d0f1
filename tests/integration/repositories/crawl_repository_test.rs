// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{insert_crawl, insert_project, seed, setup_db};
use chrono::{Duration, Utc};
use crawlsight::domain::models::crawl::CrawlStatus;
use crawlsight::domain::repositories::crawl_repository::{CrawlRepository, RepositoryError};
use crawlsight::infrastructure::repositories::crawl_repo_impl::CrawlRepositoryImpl;
use uuid::Uuid;

/// 已完成爬取按完成时间倒序返回，运行中的爬取被排除
#[tokio::test]
async fn test_find_completed_by_project() {
    let db = setup_db().await;
    let seed = seed(db.as_ref()).await;
    let repo = CrawlRepositoryImpl::new(db.clone());

    let crawls = repo.find_completed_by_project(seed.project_id, 10).await.unwrap();
    let ids: Vec<Uuid> = crawls.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![seed.crawl_b, seed.crawl_a]);
    assert!(crawls.iter().all(|c| c.status == CrawlStatus::Completed));

    let limited = repo.find_completed_by_project(seed.project_id, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, seed.crawl_b);

    let latest = repo.find_latest_completed(seed.project_id).await.unwrap();
    assert_eq!(latest.map(|c| c.id), Some(seed.crawl_b));
}

#[tokio::test]
async fn test_find_by_id_and_project_listing() {
    let db = setup_db().await;
    let seed = seed(db.as_ref()).await;
    let repo = CrawlRepositoryImpl::new(db.clone());

    let running = repo.find_by_id(seed.running_crawl).await.unwrap().unwrap();
    assert_eq!(running.status, CrawlStatus::Running);
    assert!(running.completed_at.is_none());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());

    let all = repo.find_by_project(seed.project_id).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    assert!(repo.project_exists(seed.project_id).await.unwrap());
    assert!(!repo.project_exists(Uuid::new_v4()).await.unwrap());
    assert!(repo
        .find_latest_completed(seed.empty_project_id)
        .await
        .unwrap()
        .is_none());
}

/// 无法识别的状态值作为数据库错误返回
#[tokio::test]
async fn test_unknown_status_is_reported() {
    let db = setup_db().await;
    let project_id = insert_project(db.as_ref(), "legacy").await;
    let crawl_id = insert_crawl(
        db.as_ref(),
        project_id,
        "archived",
        Some(Utc::now() - Duration::days(1)),
        (0, 0, 0),
    )
    .await;
    let repo = CrawlRepositoryImpl::new(db.clone());

    let result = repo.find_by_id(crawl_id).await;
    assert!(matches!(result, Err(RepositoryError::Database(_))));
}
