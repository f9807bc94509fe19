// ==========================================
// 数据平台 - 趋势结论
// ==========================================
// 策略: 端点变化率
//   pct = (last - first) / (first + ε)
//   pct >  2% → 上升
//   pct < -2% → 下降
//   其余      → 平稳
// 少于 2 个点不给数值结论
// ==========================================

use crate::engine::aggregation::DIVISION_EPSILON;

/// 判定阈值（比例，不是百分数）
pub const TREND_THRESHOLD: f64 = 0.02;

/// 趋势方向（携带变化率的百分数）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendDirection {
    NotEnoughData,
    Increased(f64),
    Decreased(f64),
    Stable,
}

pub struct TrendNarrator;

impl TrendNarrator {
    pub fn new() -> Self {
        Self
    }

    /// 判定趋势方向
    pub fn classify(&self, series: &[f64]) -> TrendDirection {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return TrendDirection::NotEnoughData;
        };
        if series.len() < 2 {
            return TrendDirection::NotEnoughData;
        }

        let pct_change = (last - first) / (first + DIVISION_EPSILON);

        if pct_change > TREND_THRESHOLD {
            TrendDirection::Increased(pct_change * 100.0)
        } else if pct_change < -TREND_THRESHOLD {
            TrendDirection::Decreased(pct_change.abs() * 100.0)
        } else {
            TrendDirection::Stable
        }
    }

    /// 生成一句话结论
    pub fn narrate(&self, series: &[f64]) -> String {
        match self.classify(series) {
            TrendDirection::NotEnoughData => "Not enough data to infer trend.".to_string(),
            TrendDirection::Increased(pct) => format!("Production increased by {:.1}%.", pct),
            TrendDirection::Decreased(pct) => format!("Production decreased by {:.1}%.", pct),
            TrendDirection::Stable => "Production stable.".to_string(),
        }
    }

    /// 整数产量序列的便捷入口
    pub fn narrate_counts(&self, series: &[i64]) -> String {
        let values: Vec<f64> = series.iter().map(|v| *v as f64).collect();
        self.narrate(&values)
    }
}

impl Default for TrendNarrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_is_stable() {
        let narrator = TrendNarrator::new();
        assert_eq!(narrator.classify(&[100.0, 100.0]), TrendDirection::Stable);
        assert_eq!(narrator.narrate(&[100.0, 100.0]), "Production stable.");
        // 阈值内的小幅波动
        assert_eq!(narrator.narrate(&[100.0, 101.5]), "Production stable.");
    }

    #[test]
    fn test_increase_cites_percentage() {
        let text = TrendNarrator::new().narrate(&[100.0, 150.0]);
        assert_eq!(text, "Production increased by 50.0%.");
    }

    #[test]
    fn test_decrease_cites_absolute_percentage() {
        let text = TrendNarrator::new().narrate(&[100.0, 50.0]);
        assert_eq!(text, "Production decreased by 50.0%.");
    }

    #[test]
    fn test_single_point_or_empty_is_not_enough_data() {
        let narrator = TrendNarrator::new();
        assert_eq!(narrator.narrate(&[100.0]), "Not enough data to infer trend.");
        assert_eq!(narrator.narrate(&[]), "Not enough data to infer trend.");
    }

    #[test]
    fn test_only_endpoints_matter() {
        let narrator = TrendNarrator::new();
        assert_eq!(
            narrator.narrate_counts(&[100, 10, 500, 100]),
            "Production stable."
        );
    }

    #[test]
    fn test_zero_start_does_not_panic() {
        let narrator = TrendNarrator::new();
        match narrator.classify(&[0.0, 5.0]) {
            TrendDirection::Increased(pct) => assert!(pct.is_finite()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
