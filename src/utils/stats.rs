// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 数值辅助函数
//!
//! 所有函数对空输入返回 0，不会出现除零。

/// 对样本排序，丢弃 NaN 和无穷值
pub fn sorted_samples<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut samples: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    samples.sort_by(f64::total_cmp);
    samples
}

/// 线性插值百分位数
///
/// `rank = p / 100 * (n - 1)`，在 floor 与 ceil 下标之间插值。
/// `sorted` 必须已升序排列。
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// 算术平均值
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 四舍五入到指定小数位
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// 百分比，分母为 0 时返回 0
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates_between_ranks() {
        let sorted = vec![100.0, 300.0, 900.0, 1500.0, 3000.0];
        assert_eq!(percentile(&sorted, 50.0), 900.0);
        // rank = 0.9 * 4 = 3.6
        assert!((percentile(&sorted, 90.0) - 2400.0).abs() < 1e-9);
        // rank = 0.95 * 4 = 3.8
        assert!((percentile(&sorted, 95.0) - 2700.0).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 0.0), 100.0);
        assert_eq!(percentile(&sorted, 100.0), 3000.0);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[42.0], 95.0), 42.0);
        assert_eq!(percentile(&[1.0, 3.0], 50.0), 2.0);
    }

    #[test]
    fn test_sorted_samples_drops_non_finite() {
        let samples = sorted_samples(vec![3.0, f64::NAN, 1.0, f64::INFINITY, 2.0]);
        assert_eq!(samples, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_mean_and_rounding() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(round_to(1.2345, 1), 1.2);
        assert_eq!(round_to(84.999, 2), 85.0);
        assert_eq!(percent(1, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
