// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// WCAG 一致性级别，排序 A < AA < AAA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl WcagLevel {
    pub const ALL: [WcagLevel; 3] = [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA];
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// WCAG 四大原则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WcagPrinciple {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

impl WcagPrinciple {
    pub const ALL: [WcagPrinciple; 4] = [
        WcagPrinciple::Perceivable,
        WcagPrinciple::Operable,
        WcagPrinciple::Understandable,
        WcagPrinciple::Robust,
    ];
}

impl fmt::Display for WcagPrinciple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WcagPrinciple::Perceivable => write!(f, "perceivable"),
            WcagPrinciple::Operable => write!(f, "operable"),
            WcagPrinciple::Understandable => write!(f, "understandable"),
            WcagPrinciple::Robust => write!(f, "robust"),
        }
    }
}

/// 未能识别的问题类型归入的桶名
pub const OTHER_BUCKET: &str = "other";

/// 单项检查的评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub id: String,
    pub label: String,
    pub weight: u32,
    pub passing: u64,
    pub evaluated: u64,
}

/// 法定无障碍清单（BFSG）中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItemResult {
    pub id: String,
    pub label: String,
    pub passed: bool,
    pub failing_pages: u64,
}

/// 法定无障碍清单结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfsgChecklist {
    pub items: Vec<ChecklistItemResult>,
    pub passed: u64,
    pub total: u64,
    pub compliance_percent: f64,
}

/// 按问题类型统计的无障碍问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityIssueType {
    pub issue_type: String,
    pub label: String,
    pub count: u64,
    pub level: Option<WcagLevel>,
    pub principle: Option<WcagPrinciple>,
}

/// 受影响最严重的URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedUrl {
    pub url: String,
    pub issue_count: u64,
}

/// 无障碍评分报告
///
/// 没有已完成的爬取时 `crawl_id` 为空并附带说明信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    pub project_id: Uuid,
    pub crawl_id: Option<Uuid>,
    pub message: Option<String>,
    pub eligible_pages: u64,
    pub wcag_score: Option<u8>,
    pub score_a: Option<u8>,
    pub score_aa: Option<u8>,
    pub score_aaa: Option<u8>,
    pub conformance_level: Option<WcagLevel>,
    pub bfsg_compliant: bool,
    pub issues_by_level: BTreeMap<String, u64>,
    pub issues_by_principle: BTreeMap<String, u64>,
    pub issues_by_category: BTreeMap<String, u64>,
    pub issues_by_type: Vec<AccessibilityIssueType>,
    pub top_affected_urls: Vec<AffectedUrl>,
    pub bfsg_checklist: Option<BfsgChecklist>,
}

impl AccessibilityReport {
    /// 项目没有已完成爬取时的占位报告
    pub fn without_crawl(project_id: Uuid) -> Self {
        Self {
            project_id,
            crawl_id: None,
            message: Some("No completed crawl available for this project yet".to_string()),
            eligible_pages: 0,
            wcag_score: None,
            score_a: None,
            score_aa: None,
            score_aaa: None,
            conformance_level: None,
            bfsg_compliant: false,
            issues_by_level: BTreeMap::new(),
            issues_by_principle: BTreeMap::new(),
            issues_by_category: BTreeMap::new(),
            issues_by_type: Vec::new(),
            top_affected_urls: Vec::new(),
            bfsg_checklist: None,
        }
    }
}

/// 移动端评分等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRating {
    Good,
    NeedsImprovement,
    Poor,
}

impl ScoreRating {
    /// ≥80 good，50–79 needs improvement，<50 poor
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreRating::Good
        } else if score >= 50.0 {
            ScoreRating::NeedsImprovement
        } else {
            ScoreRating::Poor
        }
    }
}

/// 移动端评分分布
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    #[serde(rename = "0-20")]
    pub very_poor: u64,
    #[serde(rename = "21-40")]
    pub poor: u64,
    #[serde(rename = "41-60")]
    pub fair: u64,
    #[serde(rename = "61-80")]
    pub good: u64,
    #[serde(rename = "81-100")]
    pub excellent: u64,
}

impl ScoreDistribution {
    pub fn add(&mut self, score: u32) {
        match score {
            0..=20 => self.very_poor += 1,
            21..=40 => self.poor += 1,
            41..=60 => self.fair += 1,
            61..=80 => self.good += 1,
            _ => self.excellent += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.very_poor + self.poor + self.fair + self.good + self.excellent
    }
}

/// 单页移动端评估
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilePageResult {
    pub page_id: Uuid,
    pub url: String,
    pub mobile_score: u32,
    pub rating: ScoreRating,
    pub issues_count: usize,
    /// 未通过的检查，按目录顺序排列
    pub mobile_issues: Vec<String>,
}

/// 移动端评分摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileSummary {
    pub project_id: Uuid,
    pub crawl_id: Option<Uuid>,
    pub total_pages: u64,
    pub pages_with_issues: u64,
    pub average_score: Option<f64>,
    pub rating: Option<ScoreRating>,
    pub score_distribution: ScoreDistribution,
    pub checks: Vec<CheckOutcome>,
}

/// 分页的移动端问题列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileIssuesPage {
    pub crawl_id: Option<Uuid>,
    pub pages: Vec<MobilePageResult>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wcag_level_ordering() {
        assert!(WcagLevel::A < WcagLevel::AA);
        assert!(WcagLevel::AA < WcagLevel::AAA);
        assert_eq!(serde_json::to_string(&WcagLevel::AA).unwrap(), "\"AA\"");
    }

    #[test]
    fn test_score_rating_boundaries() {
        assert_eq!(ScoreRating::from_score(80.0), ScoreRating::Good);
        assert_eq!(ScoreRating::from_score(79.99), ScoreRating::NeedsImprovement);
        assert_eq!(ScoreRating::from_score(50.0), ScoreRating::NeedsImprovement);
        assert_eq!(ScoreRating::from_score(49.0), ScoreRating::Poor);
    }

    #[test]
    fn test_score_distribution_buckets() {
        let mut distribution = ScoreDistribution::default();
        for score in [0, 20, 21, 60, 61, 80, 81, 100] {
            distribution.add(score);
        }
        assert_eq!(distribution.very_poor, 2);
        assert_eq!(distribution.poor, 1);
        assert_eq!(distribution.fair, 1);
        assert_eq!(distribution.good, 2);
        assert_eq!(distribution.excellent, 2);
        assert_eq!(distribution.total(), 8);
    }
}
