// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器解析路径和查询参数，调用分析用例并把结果序列化为JSON
pub mod analytics_handler;
pub mod compliance_handler;
pub mod project_handler;
