// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与爬虫数据库和监控系统的交互。
///
/// 包含的子模块：
/// - 数据库（database）：连接池和实体映射
/// - 可观测性（observability）：Prometheus 指标导出
/// - 仓库实现（repositories）：领域仓库接口的只读实现
///
/// 基础设施层遵循依赖倒置原则，依赖于领域层的抽象接口。
pub mod database;
pub mod observability;
pub mod repositories;
