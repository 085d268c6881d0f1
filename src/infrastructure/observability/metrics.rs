// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 安装 Prometheus 导出器并注册分析请求指标。
/// 导出器安装失败（地址无效、端口占用、重复安装）只记录警告，不影响服务启动。
///
/// # 返回值
///
/// 导出器是否安装成功
pub fn init_metrics(settings: &MetricsSettings) -> bool {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return false;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(listen_addr = %settings.listen_addr, "Invalid metrics address: {}", e);
            return false;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return false;
    }

    describe_counter!(
        "analytics_requests_total",
        "Total number of analytics requests by operation and outcome"
    );
    describe_histogram!(
        "analytics_request_duration_seconds",
        Unit::Seconds,
        "Time spent loading crawl data and computing analytics"
    );

    info!("Metrics exporter listening on {}", addr);
    true
}
