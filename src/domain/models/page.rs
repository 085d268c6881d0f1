// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 扩展字段中性能评分的键
pub const PERFORMANCE_SCORE_KEY: &str = "performance_score";
/// 扩展字段中移动端检查结果的键
pub const MOBILE_CHECK_KEY: &str = "mobile_check";
/// 扩展字段中法定无障碍清单覆盖值的键
pub const BFSG_KEY: &str = "bfsg";
/// 扩展字段中 Core Web Vitals 测量值的键
pub const CWV_KEY: &str = "cwv";

/// 页面实体
///
/// 一次爬取中观察到的一个URL。爬取完成后不可变，
/// 检查器写入的功能性结果保存在 `extensions` 中。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Page {
    pub id: Uuid,
    pub crawl_id: Uuid,
    pub url: String,
    pub status_code: Option<i32>,
    pub content_type: Option<String>,
    /// 响应时间（秒）
    pub response_time: Option<f64>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub word_count: i32,
    pub internal_links_count: i32,
    pub external_links_count: i32,
    pub images_without_alt: i32,
    pub is_indexable: bool,
    pub depth: i32,
    pub crawled_at: Option<DateTime<Utc>>,
    /// 自由格式的扩展字段
    #[serde(default)]
    pub extensions: Map<String, Value>,
}

impl Page {
    /// 响应时间（毫秒）
    pub fn response_time_ms(&self) -> Option<f64> {
        self.response_time.map(|secs| secs * 1000.0)
    }

    /// 性能评分，缺失或非数值时返回 None
    pub fn performance_score(&self) -> Option<f64> {
        self.extensions
            .get(PERFORMANCE_SCORE_KEY)
            .and_then(Value::as_f64)
    }

    /// 移动端检查结果对象
    pub fn mobile_check(&self) -> Option<&Map<String, Value>> {
        self.extensions.get(MOBILE_CHECK_KEY).and_then(Value::as_object)
    }

    /// 法定无障碍清单中某一项的显式结果
    pub fn bfsg_override(&self, item_id: &str) -> Option<bool> {
        self.extensions
            .get(BFSG_KEY)
            .and_then(Value::as_object)
            .and_then(|items| items.get(item_id))
            .and_then(Value::as_bool)
    }

    /// Core Web Vitals 中某个指标的测量值
    pub fn cwv_metric(&self, metric: &str) -> Option<f64> {
        self.extensions
            .get(CWV_KEY)
            .and_then(Value::as_object)
            .and_then(|metrics| metrics.get(metric))
            .and_then(Value::as_f64)
    }

    pub fn has_cwv(&self) -> bool {
        self.extensions
            .get(CWV_KEY)
            .map(Value::is_object)
            .unwrap_or(false)
    }

    /// 是否为 HTML 页面，内容类型未知时视为 HTML
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(true)
    }

    /// 状态码是否为 2xx
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(code) if (200..300).contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with(extensions: Value) -> Page {
        Page {
            extensions: extensions.as_object().cloned().unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extension_accessors() {
        let page = page_with(json!({
            "performance_score": 72,
            "mobile_check": { "viewport_meta": true },
            "bfsg": { "lang_attribute_set": false },
            "cwv": { "lcp": 2100.0, "cls": 0.05 }
        }));

        assert_eq!(page.performance_score(), Some(72.0));
        assert!(page.mobile_check().is_some());
        assert_eq!(page.bfsg_override("lang_attribute_set"), Some(false));
        assert_eq!(page.bfsg_override("viewport_present"), None);
        assert_eq!(page.cwv_metric("cls"), Some(0.05));
        assert!(page.has_cwv());
    }

    #[test]
    fn test_missing_performance_score_is_not_invented() {
        let page = page_with(json!({ "performance_score": "n/a" }));
        assert_eq!(page.performance_score(), None);
        assert!(page.mobile_check().is_none());
    }

    #[test]
    fn test_content_type_detection() {
        let mut page = Page::default();
        assert!(page.is_html());
        page.content_type = Some("text/HTML; charset=utf-8".to_string());
        assert!(page.is_html());
        page.content_type = Some("application/pdf".to_string());
        assert!(!page.is_html());
    }
}
