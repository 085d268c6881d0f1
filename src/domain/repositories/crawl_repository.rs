// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::Crawl;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// 爬取运行仓库特质
///
/// 分析引擎只读取爬取记录，写入由爬虫负责。
/// 该特质遵循依赖倒置原则，确保领域层不依赖于具体的数据存储实现。
#[async_trait]
pub trait CrawlRepository: Send + Sync {
    /// 根据ID查找爬取运行
    ///
    /// # 参数
    ///
    /// * `id` - 爬取运行的唯一标识符
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Crawl))` - 找到时返回实体
    /// * `Ok(None)` - 未找到
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crawl>, RepositoryError>;

    /// 查询项目最近的已完成爬取
    ///
    /// 只返回状态为 completed 且带有完成时间的记录，按完成时间倒序，最多 `limit` 条
    async fn find_completed_by_project(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Crawl>, RepositoryError>;

    /// 查询项目最新的已完成爬取
    async fn find_latest_completed(&self, project_id: Uuid)
        -> Result<Option<Crawl>, RepositoryError>;

    /// 列出项目的全部爬取，按创建时间倒序
    async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Crawl>, RepositoryError>;

    /// 项目是否存在
    async fn project_exists(&self, project_id: Uuid) -> Result<bool, RepositoryError>;
}
