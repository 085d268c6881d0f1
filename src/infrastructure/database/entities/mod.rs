// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 爬虫写入的表结构，使用SeaORM框架进行对象关系映射。
/// 分析引擎只读取这些表。
pub mod crawl;
pub mod issue;
pub mod page;
pub mod project;
