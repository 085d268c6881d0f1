// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含分析引擎的核心计算逻辑。所有服务都是纯函数，
/// 只读取已加载的页面、问题和爬取记录，不修改任何存储数据。
///
/// 包含的服务：
/// - 指标聚合（metrics_aggregator）：概览、状态码分布、响应时间、高频问题和问题页面
/// - 合规评分（compliance_scorer）：带权重检查目录的通用评分机制
/// - 无障碍评分（accessibility_scorer）：WCAG 级别评分与 BFSG 法定清单
/// - 移动端评分（mobile_scorer）：移动端友好度检查
/// - 爬取对比（diff_engine）：同一项目两次爬取之间的差异
/// - 趋势分析（trend_analyzer）：项目最近多次爬取的问题数时间序列
/// - Core Web Vitals（web_vitals）：页面性能指标评级
/// - 站点地图（sitemap）：根据爬取结果生成 XML 站点地图
pub mod accessibility_scorer;
pub mod compliance_scorer;
pub mod diff_engine;
pub mod metrics_aggregator;
pub mod mobile_scorer;
pub mod sitemap;
pub mod trend_analyzer;
pub mod web_vitals;
