// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use uuid::Uuid;

use crate::domain::models::analytics::{PageVitals, VitalRating, WebVitalsSummary};
use crate::domain::models::page::Page;
use crate::utils::stats::{percentile, round_to, sorted_samples};

/// 指标阈值：(指标键, good 上限, poor 下限)
const LCP: (&str, f64, f64) = ("lcp", 2500.0, 4000.0);
const CLS: (&str, f64, f64) = ("cls", 0.1, 0.25);
const FCP: (&str, f64, f64) = ("fcp", 1800.0, 3000.0);
const TTFB: (&str, f64, f64) = ("ttfb", 800.0, 1800.0);

/// ≤ good 为 good，≤ poor 为 needs improvement，否则 poor
pub fn rate_metric(value: Option<f64>, good: f64, poor: f64) -> VitalRating {
    match value {
        None => VitalRating::Unknown,
        Some(v) if v <= good => VitalRating::Good,
        Some(v) if v <= poor => VitalRating::NeedsImprovement,
        Some(_) => VitalRating::Poor,
    }
}

/// 单页评级，至少两项 poor 为 poor，至少三项 good 为 good
pub fn rate_page(page: &Page) -> Option<PageVitals> {
    if !page.has_cwv() {
        return None;
    }

    let rate = |(key, good, poor): (&str, f64, f64)| rate_metric(page.cwv_metric(key), good, poor);
    let lcp = rate(LCP);
    let cls = rate(CLS);
    let fcp = rate(FCP);
    let ttfb = rate(TTFB);

    let ratings = [lcp, cls, fcp, ttfb];
    let poor = ratings.iter().filter(|r| **r == VitalRating::Poor).count();
    let good = ratings.iter().filter(|r| **r == VitalRating::Good).count();
    let overall = if poor >= 2 {
        VitalRating::Poor
    } else if good >= 3 {
        VitalRating::Good
    } else {
        VitalRating::NeedsImprovement
    };

    Some(PageVitals {
        lcp,
        cls,
        fcp,
        ttfb,
        overall,
    })
}

fn p75(pages: &[&Page], metric: &str, decimals: u32) -> Option<f64> {
    let samples = sorted_samples(pages.iter().filter_map(|p| p.cwv_metric(metric)));
    if samples.is_empty() {
        None
    } else {
        Some(round_to(percentile(&samples, 75.0), decimals))
    }
}

/// 爬取级别的 Core Web Vitals 汇总
pub fn summarize(crawl_id: Uuid, pages: &[Page]) -> WebVitalsSummary {
    let measured: Vec<&Page> = pages.iter().filter(|p| p.has_cwv()).collect();

    let mut summary = WebVitalsSummary {
        crawl_id,
        measured_pages: measured.len() as u64,
        good: 0,
        needs_improvement: 0,
        poor: 0,
        p75_lcp_ms: p75(&measured, LCP.0, 1),
        p75_cls: p75(&measured, CLS.0, 3),
        p75_fcp_ms: p75(&measured, FCP.0, 1),
        p75_ttfb_ms: p75(&measured, TTFB.0, 1),
    };

    for vitals in measured.iter().filter_map(|p| rate_page(p)) {
        match vitals.overall {
            VitalRating::Good => summary.good += 1,
            VitalRating::Poor => summary.poor += 1,
            _ => summary.needs_improvement += 1,
        }
    }

    summary
}
