// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了分析引擎使用的实体与派生结果，包括：
/// - 爬取运行（crawl）：一次项目爬取及其状态
/// - 页面（page）：爬取中观察到的单个URL
/// - 问题（issue）：页面上检测到的问题
/// - 统计（analytics）：概览、响应时间、高频问题等派生结果
/// - 合规（compliance）：无障碍与移动端评分结果
/// - 对比（diff）：两次爬取之间的差异
/// - 趋势（trend）：项目历史上的问题数变化
///
/// 派生结果都是每次请求重新计算的纯值，不会被持久化。
pub mod analytics;
pub mod compliance;
pub mod crawl;
pub mod diff;
pub mod issue;
pub mod page;
pub mod trend;
