// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了分析引擎消费的协作方接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供，引擎本身只需要只读访问。
///
/// 包含的仓库接口：
/// - 爬取仓库（crawl_repository）：爬取运行记录与项目存在性
/// - 页面仓库（page_repository）：按爬取加载页面
/// - 问题仓库（issue_repository）：按爬取加载问题
pub mod crawl_repository;
pub mod issue_repository;
pub mod page_repository;
