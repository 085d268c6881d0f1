// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::domain::models::compliance::{
    AccessibilityIssueType, AccessibilityReport, AffectedUrl, BfsgChecklist, ChecklistItemResult,
    WcagLevel, WcagPrinciple, OTHER_BUCKET,
};
use crate::domain::models::issue::{issue_label, Issue};
use crate::domain::models::page::Page;
use crate::domain::services::compliance_scorer::{Catalogue, ComplianceCheck};
use crate::utils::stats::{percent, round_to};

/// 问题分类标签中表示无障碍问题的值
pub const ACCESSIBILITY_CATEGORY: &str = "accessibility";

const TOP_AFFECTED_URLS: usize = 10;

/// 问题类型 → (WCAG 级别, 原则)
static WCAG_RULES: Lazy<HashMap<&'static str, (WcagLevel, WcagPrinciple)>> = Lazy::new(|| {
    use WcagLevel::{A, AA, AAA};
    use WcagPrinciple::{Operable, Perceivable, Robust, Understandable};

    HashMap::from([
        // Perceivable
        ("images_missing_alt", (A, Perceivable)),
        ("missing_alt_text", (A, Perceivable)),
        ("video_missing_captions", (A, Perceivable)),
        ("audio_missing_transcript", (A, Perceivable)),
        ("missing_form_label", (A, Perceivable)),
        ("skipped_heading_level", (A, Perceivable)),
        ("empty_heading", (A, Perceivable)),
        ("low_color_contrast", (AA, Perceivable)),
        ("missing_viewport", (AA, Perceivable)),
        ("viewport_zoom_disabled", (AA, Perceivable)),
        ("text_resize_blocked", (AA, Perceivable)),
        ("insufficient_enhanced_contrast", (AAA, Perceivable)),
        // Operable
        ("missing_title", (A, Operable)),
        ("empty_link_text", (A, Operable)),
        ("missing_skip_link", (A, Operable)),
        ("keyboard_trap", (A, Operable)),
        ("auto_playing_media", (A, Operable)),
        ("missing_focus_indicator", (AA, Operable)),
        ("link_purpose_unclear", (AAA, Operable)),
        ("touch_target_too_small", (AAA, Operable)),
        // Understandable
        ("missing_lang_attribute", (A, Understandable)),
        ("invalid_lang_attribute", (A, Understandable)),
        ("form_error_unidentified", (A, Understandable)),
        ("unexpected_context_change", (A, Understandable)),
        ("missing_lang_of_parts", (AA, Understandable)),
        ("inconsistent_navigation", (AA, Understandable)),
        ("unusual_words_unexplained", (AAA, Understandable)),
        // Robust
        ("invalid_aria", (A, Robust)),
        ("duplicate_id", (A, Robust)),
        ("missing_button_name", (A, Robust)),
        ("status_message_missing", (AA, Robust)),
    ])
});

/// 查询问题类型对应的 WCAG 级别与原则，未知类型返回 None
pub fn classify(issue_type: &str) -> Option<(WcagLevel, WcagPrinciple)> {
    WCAG_RULES.get(issue_type).copied()
}

/// 问题类型在映射表中，或分类标签为 accessibility
pub fn is_accessibility_issue(issue: &Issue) -> bool {
    classify(&issue.issue_type).is_some()
        || issue
            .category
            .as_deref()
            .map_or(false, |c| c.eq_ignore_ascii_case(ACCESSIBILITY_CATEGORY))
}

/// 参与无障碍评分的页面：2xx 且为 HTML（或内容类型未知）
pub fn is_accessibility_eligible(page: &Page) -> bool {
    page.is_success() && page.is_html()
}

/// 法定无障碍清单中的一项
pub struct BfsgItem {
    pub id: &'static str,
    pub label: &'static str,
    /// 出现任一类型的问题即不通过
    pub failing_types: &'static [&'static str],
    /// 额外的页面属性检查
    pub page_check: Option<fn(&Page) -> bool>,
}

fn no_images_without_alt(page: &Page) -> bool {
    page.images_without_alt == 0
}

fn has_title(page: &Page) -> bool {
    page.title.as_deref().map_or(false, |t| !t.trim().is_empty())
}

pub static BFSG_ITEMS: [BfsgItem; 10] = [
    BfsgItem {
        id: "viewport_present",
        label: "Viewport meta tag present",
        failing_types: &["missing_viewport"],
        page_check: None,
    },
    BfsgItem {
        id: "lang_attribute_set",
        label: "Document language declared",
        failing_types: &["missing_lang_attribute", "invalid_lang_attribute"],
        page_check: None,
    },
    BfsgItem {
        id: "images_have_alt",
        label: "Images have text alternatives",
        failing_types: &["images_missing_alt", "missing_alt_text"],
        page_check: Some(no_images_without_alt),
    },
    BfsgItem {
        id: "page_title_present",
        label: "Page has a descriptive title",
        failing_types: &["missing_title"],
        page_check: Some(has_title),
    },
    BfsgItem {
        id: "form_labels_present",
        label: "Form fields are labelled",
        failing_types: &["missing_form_label"],
        page_check: None,
    },
    BfsgItem {
        id: "sufficient_contrast",
        label: "Text contrast meets AA",
        failing_types: &["low_color_contrast"],
        page_check: None,
    },
    BfsgItem {
        id: "link_text_descriptive",
        label: "Links have discernible text",
        failing_types: &["empty_link_text"],
        page_check: None,
    },
    BfsgItem {
        id: "heading_structure",
        label: "Heading hierarchy is consistent",
        failing_types: &["skipped_heading_level", "empty_heading"],
        page_check: None,
    },
    BfsgItem {
        id: "zoom_enabled",
        label: "Zooming is not disabled",
        failing_types: &["viewport_zoom_disabled"],
        page_check: None,
    },
    BfsgItem {
        id: "aria_valid",
        label: "ARIA attributes and IDs are valid",
        failing_types: &["invalid_aria", "duplicate_id", "missing_button_name"],
        page_check: None,
    },
];

impl BfsgItem {
    /// 在单个页面上评估，页面扩展字段中的显式结果优先
    pub fn passes(&self, page: &Page, page_issues: &[&Issue]) -> bool {
        if let Some(explicit) = page.bfsg_override(self.id) {
            return explicit;
        }
        let issue_free = !page_issues
            .iter()
            .any(|issue| self.failing_types.contains(&issue.issue_type.as_str()));
        issue_free && self.page_check.map_or(true, |check| check(page))
    }
}

/// 单个页面的无障碍评估上下文
#[derive(Debug, Clone, Default)]
pub struct PageAccessibility {
    /// 每个原则下严重/警告问题的最低 WCAG 级别
    lowest_blocking: BTreeMap<WcagPrinciple, WcagLevel>,
    /// 按 BFSG_ITEMS 顺序的清单结果
    checklist: Vec<bool>,
}

impl PageAccessibility {
    pub fn build(page: &Page, page_issues: &[&Issue]) -> Self {
        let mut lowest_blocking: BTreeMap<WcagPrinciple, WcagLevel> = BTreeMap::new();
        for issue in page_issues.iter().filter(|i| i.severity.is_blocking()) {
            if let Some((level, principle)) = classify(&issue.issue_type) {
                lowest_blocking
                    .entry(principle)
                    .and_modify(|lowest| *lowest = (*lowest).min(level))
                    .or_insert(level);
            }
        }

        let checklist = BFSG_ITEMS
            .iter()
            .map(|item| item.passes(page, page_issues))
            .collect();

        Self {
            lowest_blocking,
            checklist,
        }
    }

    /// 该原则在给定级别下是否通过
    pub fn passes_principle(&self, principle: WcagPrinciple, level: WcagLevel) -> bool {
        self.lowest_blocking
            .get(&principle)
            .map_or(true, |lowest| *lowest > level)
    }

    pub fn checklist_passed(&self) -> bool {
        self.checklist.iter().all(|passed| *passed)
    }

    pub fn checklist_item(&self, index: usize) -> bool {
        self.checklist.get(index).copied().unwrap_or(false)
    }
}

fn principle_weight(principle: WcagPrinciple) -> u32 {
    match principle {
        WcagPrinciple::Perceivable => 30,
        WcagPrinciple::Operable => 25,
        WcagPrinciple::Understandable => 20,
        WcagPrinciple::Robust => 10,
    }
}

fn principle_label(principle: WcagPrinciple) -> &'static str {
    match principle {
        WcagPrinciple::Perceivable => "Perceivable",
        WcagPrinciple::Operable => "Operable",
        WcagPrinciple::Understandable => "Understandable",
        WcagPrinciple::Robust => "Robust",
    }
}

fn build_catalogue(level: WcagLevel) -> Catalogue<PageAccessibility> {
    let mut checks: Vec<ComplianceCheck<PageAccessibility>> = WcagPrinciple::ALL
        .iter()
        .map(|&principle| {
            ComplianceCheck::new(
                principle.to_string(),
                principle_label(principle),
                principle_weight(principle),
                move |ctx: &PageAccessibility| Some(ctx.passes_principle(principle, level)),
            )
        })
        .collect();
    checks.push(ComplianceCheck::new(
        "bfsg",
        "BFSG legal checklist",
        15,
        |ctx: &PageAccessibility| Some(ctx.checklist_passed()),
    ));
    Catalogue::new(checks).expect("accessibility category weights must sum to 100")
}

/// 按 A、AA、AAA 过滤的三个评分目录
static CATALOGUES: Lazy<[Catalogue<PageAccessibility>; 3]> = Lazy::new(|| {
    [
        build_catalogue(WcagLevel::A),
        build_catalogue(WcagLevel::AA),
        build_catalogue(WcagLevel::AAA),
    ]
});

/// 指定级别的无障碍评分目录
pub fn accessibility_catalogue(level: WcagLevel) -> &'static Catalogue<PageAccessibility> {
    match level {
        WcagLevel::A => &CATALOGUES[0],
        WcagLevel::AA => &CATALOGUES[1],
        WcagLevel::AAA => &CATALOGUES[2],
    }
}

/// 计算一次已完成爬取的无障碍报告
///
/// 只统计参与评分页面上的问题。没有参与评分的页面时各项得分和一致性级别为空，
/// 清单不输出。
pub fn score_accessibility(
    project_id: Uuid,
    crawl_id: Uuid,
    pages: &[Page],
    issues: &[Issue],
) -> AccessibilityReport {
    let eligible: Vec<&Page> = pages.iter().filter(|p| is_accessibility_eligible(p)).collect();
    let eligible_ids: HashSet<Uuid> = eligible.iter().map(|p| p.id).collect();

    let mut issues_by_page: HashMap<Uuid, Vec<&Issue>> = HashMap::new();
    for issue in issues.iter().filter(|i| eligible_ids.contains(&i.page_id)) {
        issues_by_page.entry(issue.page_id).or_default().push(issue);
    }

    let contexts: Vec<PageAccessibility> = eligible
        .iter()
        .map(|page| {
            let page_issues = issues_by_page
                .get(&page.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            PageAccessibility::build(page, page_issues)
        })
        .collect();

    let score_a = accessibility_catalogue(WcagLevel::A).score(&contexts).score;
    let score_aa = accessibility_catalogue(WcagLevel::AA).score(&contexts).score;
    let score_aaa = accessibility_catalogue(WcagLevel::AAA).score(&contexts).score;

    let a11y_issues: Vec<&Issue> = issues
        .iter()
        .filter(|i| eligible_ids.contains(&i.page_id) && is_accessibility_issue(i))
        .collect();

    let conformance_level = if eligible.is_empty() {
        None
    } else {
        conformance_level(&a11y_issues)
    };

    let bfsg_checklist = if eligible.is_empty() {
        None
    } else {
        Some(bfsg_checklist(&contexts))
    };
    let bfsg_compliant = bfsg_checklist
        .as_ref()
        .map_or(false, |c| c.total > 0 && c.passed == c.total);

    let (issues_by_level, issues_by_principle, issues_by_category) = breakdowns(&a11y_issues);

    AccessibilityReport {
        project_id,
        crawl_id: Some(crawl_id),
        message: None,
        eligible_pages: eligible.len() as u64,
        wcag_score: score_aa,
        score_a,
        score_aa,
        score_aaa,
        conformance_level,
        bfsg_compliant,
        issues_by_level,
        issues_by_principle,
        issues_by_category,
        issues_by_type: issues_by_type(&a11y_issues),
        top_affected_urls: top_affected_urls(&eligible, &a11y_issues),
        bfsg_checklist,
    }
}

/// 最高的一致性级别：该级别及以下没有严重或警告问题
fn conformance_level(a11y_issues: &[&Issue]) -> Option<WcagLevel> {
    let lowest_blocking = a11y_issues
        .iter()
        .filter(|i| i.severity.is_blocking())
        .filter_map(|i| classify(&i.issue_type).map(|(level, _)| level))
        .min();

    WcagLevel::ALL
        .iter()
        .copied()
        .filter(|level| lowest_blocking.map_or(true, |lowest| lowest > *level))
        .max()
}

fn bfsg_checklist(contexts: &[PageAccessibility]) -> BfsgChecklist {
    let items: Vec<ChecklistItemResult> = BFSG_ITEMS
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let failing_pages = contexts
                .iter()
                .filter(|ctx| !ctx.checklist_item(index))
                .count() as u64;
            ChecklistItemResult {
                id: item.id.to_string(),
                label: item.label.to_string(),
                passed: failing_pages == 0,
                failing_pages,
            }
        })
        .collect();

    let passed = items.iter().filter(|i| i.passed).count() as u64;
    let total = items.len() as u64;
    BfsgChecklist {
        items,
        passed,
        total,
        compliance_percent: round_to(percent(passed, total), 1),
    }
}

type Breakdown = BTreeMap<String, u64>;

fn breakdowns(a11y_issues: &[&Issue]) -> (Breakdown, Breakdown, Breakdown) {
    let mut by_level: Breakdown = WcagLevel::ALL.iter().map(|l| (l.to_string(), 0)).collect();
    let mut by_principle: Breakdown = WcagPrinciple::ALL
        .iter()
        .map(|p| (p.to_string(), 0))
        .collect();
    let mut by_category = Breakdown::new();

    for issue in a11y_issues {
        let (level_key, principle_key) = match classify(&issue.issue_type) {
            Some((level, principle)) => (level.to_string(), principle.to_string()),
            None => (OTHER_BUCKET.to_string(), OTHER_BUCKET.to_string()),
        };
        *by_level.entry(level_key).or_insert(0) += 1;
        *by_principle.entry(principle_key).or_insert(0) += 1;

        let category = issue
            .category
            .clone()
            .unwrap_or_else(|| OTHER_BUCKET.to_string());
        *by_category.entry(category).or_insert(0) += 1;
    }

    (by_level, by_principle, by_category)
}

fn issues_by_type(a11y_issues: &[&Issue]) -> Vec<AccessibilityIssueType> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for issue in a11y_issues {
        *counts.entry(issue.issue_type.as_str()).or_insert(0) += 1;
    }

    let mut types: Vec<AccessibilityIssueType> = counts
        .into_iter()
        .map(|(issue_type, count)| {
            let rule = classify(issue_type);
            AccessibilityIssueType {
                issue_type: issue_type.to_string(),
                label: issue_label(issue_type),
                count,
                level: rule.map(|(level, _)| level),
                principle: rule.map(|(_, principle)| principle),
            }
        })
        .collect();
    types.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.issue_type.cmp(&b.issue_type)));
    types
}

fn top_affected_urls(eligible: &[&Page], a11y_issues: &[&Issue]) -> Vec<AffectedUrl> {
    let mut per_page: HashMap<Uuid, u64> = HashMap::new();
    for issue in a11y_issues {
        *per_page.entry(issue.page_id).or_insert(0) += 1;
    }

    let mut affected: Vec<AffectedUrl> = eligible
        .iter()
        .filter_map(|page| {
            per_page.get(&page.id).map(|count| AffectedUrl {
                url: page.url.clone(),
                issue_count: *count,
            })
        })
        .collect();
    affected.sort_by(|a, b| b.issue_count.cmp(&a.issue_count).then_with(|| a.url.cmp(&b.url)));
    affected.truncate(TOP_AFFECTED_URLS);
    affected
}
