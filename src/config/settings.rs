// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、分析参数、URL规范化和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 分析引擎配置
    pub analytics: AnalyticsSettings,
    /// URL规范化配置（用于爬取对比）
    pub url_normalization: UrlNormalizationSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 分析引擎配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// 慢页面阈值（秒）
    pub slow_page_threshold_secs: f64,
    /// 默认 Top-N 数量
    pub default_top_n: u32,
    /// 最大 Top-N 数量
    pub max_top_n: u32,
    /// 单次请求最多加载的页面数
    pub max_pages_per_request: u64,
    /// 单次请求最多加载的问题数
    pub max_issues_per_request: u64,
    /// 对比结果中每个明细列表的最大长度
    pub diff_list_limit: usize,
    /// 默认趋势点数量
    pub trend_default_limit: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            slow_page_threshold_secs: 3.0,
            default_top_n: 10,
            max_top_n: 100,
            max_pages_per_request: 50_000,
            max_issues_per_request: 200_000,
            diff_list_limit: 500,
            trend_default_limit: 10,
        }
    }
}

/// URL规范化配置设置
///
/// 对比两次爬取时，URL按规范化后的键进行匹配
#[derive(Debug, Clone, Deserialize)]
pub struct UrlNormalizationSettings {
    /// 去掉默认端口
    pub strip_default_port: bool,
    /// 去掉片段标识符
    pub drop_fragment: bool,
    /// 忽略路径末尾的斜杠
    pub strip_trailing_slash: bool,
    /// 查询参数排序
    pub sort_query: bool,
}

impl Default for UrlNormalizationSettings {
    fn default() -> Self {
        Self {
            strip_default_port: true,
            drop_fragment: true,
            strip_trailing_slash: true,
            sort_query: false,
        }
    }
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").ok();
        let mut builder = Self::builder()?;
        for file in Self::config_files(env.as_deref()) {
            builder = builder.add_source(File::with_name(&file).required(false));
        }
        builder
            .add_source(Environment::with_prefix("CRAWLSIGHT").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 按加载顺序返回配置文件，`default` 环境不再重复加载
    pub(crate) fn config_files(env: Option<&str>) -> Vec<String> {
        let mut files = vec!["config/default".to_string()];
        match env {
            Some(env) if !env.is_empty() && env != "default" => {
                files.push(format!("config/{}", env));
            }
            _ => {}
        }
        files
    }

    /// 只包含内置默认值的配置构建器
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let analytics = AnalyticsSettings::default();
        let normalization = UrlNormalizationSettings::default();

        Config::builder()
            // Start with default settings
            .set_default("database.url", "sqlite://crawlsight.db?mode=ro")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default analytics settings
            .set_default(
                "analytics.slow_page_threshold_secs",
                analytics.slow_page_threshold_secs,
            )?
            .set_default("analytics.default_top_n", analytics.default_top_n)?
            .set_default("analytics.max_top_n", analytics.max_top_n)?
            .set_default(
                "analytics.max_pages_per_request",
                analytics.max_pages_per_request,
            )?
            .set_default(
                "analytics.max_issues_per_request",
                analytics.max_issues_per_request,
            )?
            .set_default("analytics.diff_list_limit", analytics.diff_list_limit as u64)?
            .set_default("analytics.trend_default_limit", analytics.trend_default_limit)?
            // Default URL normalization settings
            .set_default(
                "url_normalization.strip_default_port",
                normalization.strip_default_port,
            )?
            .set_default("url_normalization.drop_fragment", normalization.drop_fragment)?
            .set_default(
                "url_normalization.strip_trailing_slash",
                normalization.strip_trailing_slash,
            )?
            .set_default("url_normalization.sort_query", normalization.sort_query)?
            // Default metrics settings
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }
}
