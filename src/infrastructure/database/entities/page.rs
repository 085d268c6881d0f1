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

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub crawl_id: Uuid,
    pub url: String,
    pub status_code: Option<i32>,
    pub content_type: Option<String>,
    /// 响应时间（秒）
    pub response_time: Option<f64>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub word_count: i32,
    pub internal_links_count: i32,
    pub external_links_count: i32,
    pub images_without_alt: i32,
    pub is_indexable: bool,
    pub depth: i32,
    pub crawled_at: Option<ChronoDateTimeWithTimeZone>,
    pub extensions: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::crawl::Entity",
        from = "Column::CrawlId",
        to = "super::crawl::Column::Id"
    )]
    Crawl,
    #[sea_orm(has_many = "super::issue::Entity")]
    Issue,
}

impl Related<super::crawl::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crawl.def()
    }
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
