// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{seed, setup_db};
use crawlsight::domain::models::issue::IssueSeverity;
use crawlsight::domain::repositories::issue_repository::IssueRepository;
use crawlsight::domain::repositories::page_repository::PageRepository;
use crawlsight::infrastructure::repositories::issue_repo_impl::IssueRepositoryImpl;
use crawlsight::infrastructure::repositories::page_repo_impl::PageRepositoryImpl;

/// 页面按URL排序加载，扩展字段保留
#[tokio::test]
async fn test_pages_are_ordered_by_url() {
    let db = setup_db().await;
    let seed = seed(db.as_ref()).await;
    let repo = PageRepositoryImpl::new(db.clone(), 1_000);

    let pages = repo.find_by_crawl_id(seed.crawl_a).await.unwrap();
    let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/",
            "https://example.com/old",
            "https://example.com/x"
        ]
    );
    assert_eq!(pages[0].performance_score(), Some(80.0));
    assert!(pages[0].mobile_check().is_some());
}

/// 超过行数上限时截断，问题与页面按同样的URL顺序保留
#[tokio::test]
async fn test_row_cap_truncates() {
    let db = setup_db().await;
    let seed = seed(db.as_ref()).await;

    let pages = PageRepositoryImpl::new(db.clone(), 2)
        .find_by_crawl_id(seed.crawl_b)
        .await
        .unwrap();
    assert_eq!(pages.len(), 2);

    let issues = IssueRepositoryImpl::new(db.clone(), 1)
        .find_by_crawl_id(seed.crawl_b)
        .await
        .unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, "images_missing_alt");
    assert_eq!(issues[0].page_id, pages[0].id);
}

#[tokio::test]
async fn test_issues_are_loaded_with_severity() {
    let db = setup_db().await;
    let seed = seed(db.as_ref()).await;
    let repo = IssueRepositoryImpl::new(db.clone(), 1_000);

    let issues = repo.find_by_crawl_id(seed.crawl_a).await.unwrap();
    assert_eq!(issues.len(), 2);
    let title = issues
        .iter()
        .find(|i| i.issue_type == "missing_title")
        .unwrap();
    assert_eq!(title.severity, IssueSeverity::Critical);
    assert_eq!(title.category.as_deref(), Some("seo"));

    assert!(repo
        .find_by_crawl_id(seed.running_crawl)
        .await
        .unwrap()
        .is_empty());
}
