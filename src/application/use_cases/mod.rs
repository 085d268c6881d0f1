// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 分析门面：加载爬取数据，调用领域服务，返回派生结果
pub mod analytics_use_case;
