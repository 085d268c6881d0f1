// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::config::settings::UrlNormalizationSettings;

/// 生成用于跨爬取匹配的URL键
///
/// 协议和主机名总是小写（由URL解析器保证），其余规则由 `options` 控制。
/// 无法解析的URL退化为去掉首尾空白的原始字符串。
pub fn normalize_url(raw: &str, options: &UrlNormalizationSettings) -> String {
    let trimmed = raw.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(url) if url.has_host() => url,
        _ => return normalize_fallback(trimmed, options),
    };

    let mut key = String::with_capacity(trimmed.len());
    key.push_str(parsed.scheme());
    key.push_str("://");
    key.push_str(parsed.host_str().unwrap_or_default());

    // `port()` 已经省略了协议的默认端口
    let port = if options.strip_default_port {
        parsed.port()
    } else {
        parsed.port_or_known_default()
    };
    if let Some(port) = port {
        key.push(':');
        key.push_str(&port.to_string());
    }

    let path = parsed.path();
    if options.strip_trailing_slash {
        key.push_str(path.trim_end_matches('/'));
    } else {
        key.push_str(path);
    }

    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        key.push('?');
        if options.sort_query {
            let mut pairs: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
            pairs.sort_unstable();
            key.push_str(&pairs.join("&"));
        } else {
            key.push_str(query);
        }
    }

    if !options.drop_fragment {
        if let Some(fragment) = parsed.fragment() {
            key.push('#');
            key.push_str(fragment);
        }
    }

    key
}

fn normalize_fallback(trimmed: &str, options: &UrlNormalizationSettings) -> String {
    let mut value = trimmed;
    if options.drop_fragment {
        value = value.split('#').next().unwrap_or(value);
    }
    if options.strip_trailing_slash && !value.contains('?') {
        value = value.trim_end_matches('/');
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> UrlNormalizationSettings {
        UrlNormalizationSettings::default()
    }

    #[test]
    fn test_trailing_slash_insensitive() {
        let options = defaults();
        assert_eq!(
            normalize_url("https://example.com/blog/", &options),
            normalize_url("https://example.com/blog", &options)
        );
        assert_eq!(
            normalize_url("https://example.com/", &options),
            "https://example.com"
        );
    }

    #[test]
    fn test_scheme_and_host_are_lowercased() {
        let options = defaults();
        assert_eq!(
            normalize_url("HTTPS://Example.COM/Path", &options),
            "https://example.com/Path"
        );
    }

    #[test]
    fn test_default_port_handling() {
        let mut options = defaults();
        assert_eq!(
            normalize_url("http://example.com:80/a", &options),
            "http://example.com/a"
        );
        assert_eq!(
            normalize_url("http://example.com:8080/a", &options),
            "http://example.com:8080/a"
        );

        options.strip_default_port = false;
        assert_eq!(
            normalize_url("http://example.com/a", &options),
            "http://example.com:80/a"
        );
    }

    #[test]
    fn test_query_kept_and_optionally_sorted() {
        let mut options = defaults();
        assert_eq!(
            normalize_url("https://example.com/s?b=2&a=1", &options),
            "https://example.com/s?b=2&a=1"
        );
        assert_ne!(
            normalize_url("https://example.com/s?a=1", &options),
            normalize_url("https://example.com/s?a=2", &options)
        );

        options.sort_query = true;
        assert_eq!(
            normalize_url("https://example.com/s?b=2&a=1", &options),
            "https://example.com/s?a=1&b=2"
        );
    }

    #[test]
    fn test_fragment_handling() {
        let mut options = defaults();
        assert_eq!(
            normalize_url("https://example.com/a#top", &options),
            "https://example.com/a"
        );

        options.drop_fragment = false;
        assert_eq!(
            normalize_url("https://example.com/a#top", &options),
            "https://example.com/a#top"
        );
    }

    #[test]
    fn test_unparseable_url_falls_back_to_trimmed_input() {
        let options = defaults();
        assert_eq!(normalize_url("  /x/  ", &options), "/x");
        assert_eq!(normalize_url("not a url#frag", &options), "not a url");
    }
}
