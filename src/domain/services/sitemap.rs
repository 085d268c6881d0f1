// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::page::Page;

const CHANGE_FREQUENCY: &str = "weekly";

/// 可以写入站点地图的页面：200、可索引、HTML
pub fn is_sitemap_candidate(page: &Page) -> bool {
    page.status_code == Some(200) && page.is_indexable && page.is_html()
}

/// 按深度给出优先级
pub fn priority_for_depth(depth: i32) -> &'static str {
    match depth {
        i32::MIN..=0 => "1.0",
        1 => "0.8",
        2 => "0.6",
        _ => "0.4",
    }
}

/// 生成 XML 站点地图
///
/// 页面按深度、再按URL排序，`lastmod` 取抓取日期。
pub fn build_sitemap(pages: &[Page]) -> String {
    let mut entries: Vec<&Page> = pages.iter().filter(|p| is_sitemap_candidate(p)).collect();
    entries.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.url.cmp(&b.url)));

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in entries {
        xml.push_str(&url_entry(page));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn url_entry(page: &Page) -> String {
    let lastmod = page
        .crawled_at
        .map(|crawled_at| format!("    <lastmod>{}</lastmod>\n", crawled_at.format("%Y-%m-%d")))
        .unwrap_or_default();

    format!(
        "  <url>\n    <loc>{}</loc>\n{}    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        html_escape::encode_text(&page.url),
        lastmod,
        CHANGE_FREQUENCY,
        priority_for_depth(page.depth),
    )
}
