// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::crawl_repository::RepositoryError;
use crate::domain::models::page::Page;
use async_trait::async_trait;
use uuid::Uuid;

/// 页面仓库特质
///
/// 定义页面数据的只读访问接口
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// 加载某次爬取的页面，按URL排序
    async fn find_by_crawl_id(&self, crawl_id: Uuid) -> Result<Vec<Page>, RepositoryError>;
}
