// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含查询参数与分析用例，连接表现层和领域层
pub mod dto;
pub mod use_cases;
