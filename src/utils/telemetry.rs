// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志格式环境变量，取值 `json` 时输出结构化日志
pub const LOG_FORMAT_ENV: &str = "CRAWLSIGHT_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info,crawlsight=debug";

/// 初始化 tracing 订阅器
///
/// 过滤规则来自 `RUST_LOG`，未设置时使用默认值。
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json_output_requested(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn json_output_requested(format: Option<&str>) -> bool {
    matches!(format, Some(value) if value.trim().eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_selection() {
        assert!(json_output_requested(Some("json")));
        assert!(json_output_requested(Some(" JSON ")));
        assert!(!json_output_requested(Some("pretty")));
        assert!(!json_output_requested(None));
    }
}
