// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的只读仓库实现，页面和问题仓库按配置限制单次加载的行数
pub mod crawl_repo_impl;
pub mod issue_repo_impl;
pub mod page_repo_impl;
