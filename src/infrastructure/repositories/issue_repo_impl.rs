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

use crate::domain::models::issue::{Issue, IssueSeverity};
use crate::domain::repositories::crawl_repository::RepositoryError;
use crate::domain::repositories::issue_repository::IssueRepository;
use crate::infrastructure::database::entities::{issue as issue_entity, page as page_entity};
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 问题仓库实现
///
/// 每次最多加载 `max_rows` 行，超出时截断并记录警告。
/// 行按所属页面的 URL 排序，与页面仓库的截断顺序一致。
pub struct IssueRepositoryImpl {
    db: Arc<DatabaseConnection>,
    max_rows: u64,
}

impl IssueRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>, max_rows: u64) -> Self {
        Self { db, max_rows }
    }
}

fn to_domain(m: issue_entity::Model) -> Result<Issue, RepositoryError> {
    let severity = m.severity.parse::<IssueSeverity>().map_err(|_| {
        RepositoryError::Database(DbErr::Custom(format!(
            "Invalid issue severity: {}",
            m.severity
        )))
    })?;

    Ok(Issue {
        id: m.id,
        crawl_id: m.crawl_id,
        page_id: m.page_id,
        severity,
        issue_type: m.issue_type,
        description: m.description,
        recommendation: m.recommendation,
        category: m.category,
    })
}

#[async_trait]
impl IssueRepository for IssueRepositoryImpl {
    async fn find_by_crawl_id(&self, crawl_id: Uuid) -> Result<Vec<Issue>, RepositoryError> {
        let mut models = issue_entity::Entity::find()
            .inner_join(page_entity::Entity)
            .filter(issue_entity::Column::CrawlId.eq(crawl_id))
            .order_by_asc(page_entity::Column::Url)
            .order_by_asc(page_entity::Column::Id)
            .order_by_asc(issue_entity::Column::IssueType)
            .order_by_asc(issue_entity::Column::Id)
            .limit(self.max_rows.saturating_add(1))
            .all(self.db.as_ref())
            .await?;

        if models.len() as u64 > self.max_rows {
            warn!(%crawl_id, max_rows = self.max_rows, "Issue row cap reached, truncating");
            models.truncate(self.max_rows as usize);
        }

        models.into_iter().map(to_domain).collect()
    }
}
