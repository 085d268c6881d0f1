// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::domain::models::compliance::CheckOutcome;

/// 每个评分族的权重总和
pub const TOTAL_WEIGHT: u32 = 100;

/// 目录构建错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("Catalogue has no checks")]
    Empty,
    #[error("Catalogue weights sum to {0}, expected 100")]
    InvalidWeightSum(u32),
    #[error("Duplicate check id: {0}")]
    DuplicateCheck(String),
}

type Evaluator<T> = Box<dyn Fn(&T) -> Option<bool> + Send + Sync>;

/// 带权重的单项检查
///
/// `evaluate` 返回 `None` 表示该条目没有这项检查的数据。
pub struct ComplianceCheck<T> {
    pub id: String,
    pub label: String,
    pub weight: u32,
    evaluate: Evaluator<T>,
}

impl<T> ComplianceCheck<T> {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, weight: u32, evaluate: F) -> Self
    where
        F: Fn(&T) -> Option<bool> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
            evaluate: Box::new(evaluate),
        }
    }

    pub fn evaluate(&self, item: &T) -> Option<bool> {
        (self.evaluate)(item)
    }
}

impl<T> fmt::Debug for ComplianceCheck<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceCheck")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("weight", &self.weight)
            .finish()
    }
}

/// 目录评估结果
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueScore {
    /// 参与评估的条目数
    pub eligible: u64,
    /// 0–100 的加权得分，没有可评估数据时为 None
    pub score: Option<u8>,
    /// 每项检查的通过情况，按目录顺序
    pub outcomes: Vec<CheckOutcome>,
}

/// 加权检查目录
///
/// 构建时校验权重之和为 100 且检查ID唯一。
pub struct Catalogue<T> {
    checks: Vec<ComplianceCheck<T>>,
}

impl<T> fmt::Debug for Catalogue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.checks.iter()).finish()
    }
}

impl<T> Catalogue<T> {
    pub fn new(checks: Vec<ComplianceCheck<T>>) -> Result<Self, CatalogueError> {
        if checks.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut seen = HashSet::new();
        for check in &checks {
            if !seen.insert(check.id.as_str()) {
                return Err(CatalogueError::DuplicateCheck(check.id.clone()));
            }
        }

        let sum: u32 = checks.iter().map(|c| c.weight).sum();
        if sum != TOTAL_WEIGHT {
            return Err(CatalogueError::InvalidWeightSum(sum));
        }

        Ok(Self { checks })
    }

    pub fn checks(&self) -> &[ComplianceCheck<T>] {
        &self.checks
    }

    /// 单个条目的得分：通过检查的权重之和
    pub fn item_score(&self, item: &T) -> u32 {
        self.checks
            .iter()
            .filter(|check| check.evaluate(item) == Some(true))
            .map(|check| check.weight)
            .sum()
    }

    /// 单个条目未通过的检查ID，按目录顺序
    ///
    /// 没有数据的检查不算失败。
    pub fn failed_checks(&self, item: &T) -> Vec<String> {
        self.checks
            .iter()
            .filter(|check| check.evaluate(item) == Some(false))
            .map(|check| check.id.clone())
            .collect()
    }

    /// 对一组条目评分
    ///
    /// 每项检查的通过率 = 通过数 / 有数据的条目数，
    /// 得分 = Σ(权重 × 通过率)。没有任何数据的检查被剔除，
    /// 其余权重重新归一到 100。
    pub fn score<'a, I>(&self, items: I) -> CatalogueScore
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut outcomes: Vec<CheckOutcome> = self
            .checks
            .iter()
            .map(|check| CheckOutcome {
                id: check.id.clone(),
                label: check.label.clone(),
                weight: check.weight,
                passing: 0,
                evaluated: 0,
            })
            .collect();

        let mut eligible = 0u64;
        for item in items {
            eligible += 1;
            for (check, outcome) in self.checks.iter().zip(outcomes.iter_mut()) {
                if let Some(passed) = check.evaluate(item) {
                    outcome.evaluated += 1;
                    if passed {
                        outcome.passing += 1;
                    }
                }
            }
        }

        let score = if eligible == 0 {
            None
        } else {
            weighted_score(&outcomes)
        };

        CatalogueScore {
            eligible,
            score,
            outcomes,
        }
    }
}

fn weighted_score(outcomes: &[CheckOutcome]) -> Option<u8> {
    let measured: Vec<&CheckOutcome> = outcomes.iter().filter(|o| o.evaluated > 0).collect();
    let measured_weight: u32 = measured.iter().map(|o| o.weight).sum();
    if measured_weight == 0 {
        return None;
    }

    let raw: f64 = measured
        .iter()
        .map(|o| o.weight as f64 * (o.passing as f64 / o.evaluated as f64))
        .sum();
    let normalized = raw * TOTAL_WEIGHT as f64 / measured_weight as f64;
    Some(normalized.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        a: Option<bool>,
        b: Option<bool>,
    }

    fn catalogue() -> Catalogue<Item> {
        Catalogue::new(vec![
            ComplianceCheck::new("a", "Check A", 60, |item: &Item| item.a),
            ComplianceCheck::new("b", "Check B", 40, |item: &Item| item.b),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_weights() {
        let result = Catalogue::new(vec![
            ComplianceCheck::new("a", "A", 60, |_: &Item| Some(true)),
            ComplianceCheck::new("b", "B", 30, |_: &Item| Some(true)),
        ]);
        assert_eq!(result.unwrap_err(), CatalogueError::InvalidWeightSum(90));

        let empty: Result<Catalogue<Item>, _> = Catalogue::new(vec![]);
        assert_eq!(empty.unwrap_err(), CatalogueError::Empty);

        let duplicate = Catalogue::new(vec![
            ComplianceCheck::new("a", "A", 50, |_: &Item| Some(true)),
            ComplianceCheck::new("a", "A again", 50, |_: &Item| Some(true)),
        ]);
        assert_eq!(
            duplicate.unwrap_err(),
            CatalogueError::DuplicateCheck("a".to_string())
        );
    }

    #[test]
    fn test_weighted_pass_rates() {
        let items = vec![
            Item { a: Some(true), b: Some(false) },
            Item { a: Some(false), b: Some(false) },
        ];
        let result = catalogue().score(&items);
        // 60 * 0.5 + 40 * 0
        assert_eq!(result.score, Some(30));
        assert_eq!(result.eligible, 2);
        assert_eq!(result.outcomes[0].passing, 1);
        assert_eq!(result.outcomes[1].evaluated, 2);
    }

    #[test]
    fn test_checks_without_data_are_renormalized() {
        let items = vec![Item { a: Some(true), b: None }];
        assert_eq!(catalogue().score(&items).score, Some(100));

        let items = vec![Item { a: None, b: None }];
        assert_eq!(catalogue().score(&items).score, None);
    }

    #[test]
    fn test_zero_items_is_null_not_zero() {
        let items: Vec<Item> = Vec::new();
        let result = catalogue().score(&items);
        assert_eq!(result.score, None);
        assert_eq!(result.eligible, 0);
    }

    #[test]
    fn test_item_score_and_failures() {
        let catalogue = catalogue();
        let item = Item { a: Some(false), b: Some(true) };
        assert_eq!(catalogue.item_score(&item), 40);
        assert_eq!(catalogue.failed_checks(&item), vec!["a".to_string()]);

        let unknown = Item { a: None, b: Some(false) };
        assert_eq!(catalogue.failed_checks(&unknown), vec!["b".to_string()]);
    }
}
