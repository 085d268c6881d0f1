// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::crawl::{Crawl, CrawlStatus};
use crate::domain::repositories::crawl_repository::{CrawlRepository, RepositoryError};
use crate::infrastructure::database::entities::{crawl as crawl_entity, project as project_entity};
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 爬取仓库实现
pub struct CrawlRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CrawlRepositoryImpl {
    /// 创建新的爬取仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn completed_query(project_id: Uuid) -> Select<crawl_entity::Entity> {
        crawl_entity::Entity::find()
            .filter(crawl_entity::Column::ProjectId.eq(project_id))
            .filter(crawl_entity::Column::Status.eq(CrawlStatus::Completed.to_string()))
            .filter(crawl_entity::Column::CompletedAt.is_not_null())
            .order_by_desc(crawl_entity::Column::CompletedAt)
    }
}

fn to_domain(m: crawl_entity::Model) -> Result<Crawl, RepositoryError> {
    let status = m.status.parse::<CrawlStatus>().map_err(|_| {
        RepositoryError::Database(DbErr::Custom(format!("Invalid crawl status: {}", m.status)))
    })?;

    Ok(Crawl {
        id: m.id,
        project_id: m.project_id,
        status,
        total_urls: m.total_urls,
        crawled_urls: m.crawled_urls,
        failed_urls: m.failed_urls,
        critical_issues: m.critical_issues,
        warning_issues: m.warning_issues,
        info_issues: m.info_issues,
        created_at: m.created_at.into(),
        started_at: m.started_at.map(Into::into),
        completed_at: m.completed_at.map(Into::into),
        error_message: m.error_message,
    })
}

#[async_trait]
impl CrawlRepository for CrawlRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Crawl>, RepositoryError> {
        crawl_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_completed_by_project(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Crawl>, RepositoryError> {
        Self::completed_query(project_id)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn find_latest_completed(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Crawl>, RepositoryError> {
        Self::completed_query(project_id)
            .one(self.db.as_ref())
            .await?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_project(&self, project_id: Uuid) -> Result<Vec<Crawl>, RepositoryError> {
        crawl_entity::Entity::find()
            .filter(crawl_entity::Column::ProjectId.eq(project_id))
            .order_by_desc(crawl_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn project_exists(&self, project_id: Uuid) -> Result<bool, RepositoryError> {
        let count = project_entity::Entity::find_by_id(project_id)
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }
}
