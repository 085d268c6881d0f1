// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 问题实体
///
/// 某个页面上检测到的一个问题。`issue_type` 是稳定的字符串键，
/// 分组、趋势统计以及 WCAG 级别分类都基于它。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub crawl_id: Uuid,
    pub page_id: Uuid,
    pub severity: IssueSeverity,
    pub issue_type: String,
    pub description: String,
    pub recommendation: Option<String>,
    pub category: Option<String>,
}

/// 问题严重级别
///
/// 排序：Critical < Warning < Info，便于"最严重优先"排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Warning,
    Info,
}

impl IssueSeverity {
    /// 是否计入合规判定（严重和警告）
    pub fn is_blocking(&self) -> bool {
        matches!(self, IssueSeverity::Critical | IssueSeverity::Warning)
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IssueSeverity::Critical => write!(f, "critical"),
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Info => write!(f, "info"),
        }
    }
}

impl FromStr for IssueSeverity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(IssueSeverity::Critical),
            "warning" => Ok(IssueSeverity::Warning),
            "info" => Ok(IssueSeverity::Info),
            _ => Err(()),
        }
    }
}

/// 按严重级别统计的问题数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub warning: u64,
    pub info: u64,
}

impl SeverityCounts {
    pub fn add(&mut self, severity: IssueSeverity) {
        match severity {
            IssueSeverity::Critical => self.critical += 1,
            IssueSeverity::Warning => self.warning += 1,
            IssueSeverity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.critical + self.warning + self.info
    }
}

/// 把问题类型转换为可读标签，例如 `missing_title` → `Missing Title`
pub fn issue_label(issue_type: &str) -> String {
    issue_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_label() {
        assert_eq!(issue_label("missing_title"), "Missing Title");
        assert_eq!(issue_label("images_missing_alt"), "Images Missing Alt");
        assert_eq!(issue_label("H1"), "H1");
        assert_eq!(issue_label(""), "");
    }

    #[test]
    fn test_severity_ordering_puts_critical_first() {
        let mut severities = vec![IssueSeverity::Info, IssueSeverity::Critical, IssueSeverity::Warning];
        severities.sort();
        assert_eq!(
            severities,
            vec![IssueSeverity::Critical, IssueSeverity::Warning, IssueSeverity::Info]
        );
    }

    #[test]
    fn test_severity_counts() {
        let mut counts = SeverityCounts::default();
        counts.add(IssueSeverity::Critical);
        counts.add(IssueSeverity::Info);
        counts.add(IssueSeverity::Info);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.info, 2);
    }
}
