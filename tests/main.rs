// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试主模块
///
/// 集成测试：内存 SQLite 数据库 + 真实路由
mod integration;
