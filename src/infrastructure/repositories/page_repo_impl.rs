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

use crate::domain::models::page::Page;
use crate::domain::repositories::crawl_repository::RepositoryError;
use crate::domain::repositories::page_repository::PageRepository;
use crate::infrastructure::database::entities::page as page_entity;
use async_trait::async_trait;
use sea_orm::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 页面仓库实现
///
/// 每次最多加载 `max_rows` 行，超出时截断并记录警告
pub struct PageRepositoryImpl {
    db: Arc<DatabaseConnection>,
    max_rows: u64,
}

impl PageRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>, max_rows: u64) -> Self {
        Self { db, max_rows }
    }
}

fn to_domain(m: page_entity::Model) -> Page {
    let extensions = match m.extensions {
        Some(Value::Object(map)) => map,
        _ => Default::default(),
    };

    Page {
        id: m.id,
        crawl_id: m.crawl_id,
        url: m.url,
        status_code: m.status_code,
        content_type: m.content_type,
        response_time: m.response_time,
        title: m.title,
        meta_description: m.meta_description,
        h1: m.h1,
        word_count: m.word_count,
        internal_links_count: m.internal_links_count,
        external_links_count: m.external_links_count,
        images_without_alt: m.images_without_alt,
        is_indexable: m.is_indexable,
        depth: m.depth,
        crawled_at: m.crawled_at.map(Into::into),
        extensions,
    }
}

#[async_trait]
impl PageRepository for PageRepositoryImpl {
    async fn find_by_crawl_id(&self, crawl_id: Uuid) -> Result<Vec<Page>, RepositoryError> {
        let mut models = page_entity::Entity::find()
            .filter(page_entity::Column::CrawlId.eq(crawl_id))
            .order_by_asc(page_entity::Column::Url)
            .order_by_asc(page_entity::Column::Id)
            .limit(self.max_rows.saturating_add(1))
            .all(self.db.as_ref())
            .await?;

        if models.len() as u64 > self.max_rows {
            warn!(%crawl_id, max_rows = self.max_rows, "Page row cap reached, truncating");
            models.truncate(self.max_rows as usize);
        }

        Ok(models.into_iter().map(to_domain).collect())
    }
}
