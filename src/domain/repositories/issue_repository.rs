// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crawl_repository::RepositoryError;
use crate::domain::models::issue::Issue;
use async_trait::async_trait;
use uuid::Uuid;

/// 问题仓库特质
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// 加载某次爬取的全部问题
    async fn find_by_crawl_id(&self, crawl_id: Uuid) -> Result<Vec<Issue>, RepositoryError>;
}
