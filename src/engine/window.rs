// ==========================================
// 数据平台 - 时间窗口选择器
// ==========================================
// 输入: 数据集 + 可选 start / end（闭区间）
// 规则:
// - 给定 start: 丢弃 date < start 的行
// - 给定 end:   丢弃 date > end 的行
// - 都未给定:   按日期排序，仅保留最近 N 个不同日期的行
// - 无日期的行不参与任何按日期的窗口
// ==========================================

use crate::domain::Dataset;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 显式日期范围（两端可选，闭区间）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

// ==========================================
// TimeWindowSelector
// ==========================================
// 无状态，每次请求独立调用
pub struct TimeWindowSelector {
    window_days: usize,
}

impl TimeWindowSelector {
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }

    /// 选择窗口内的记录
    pub fn select(&self, mut dataset: Dataset, range: &DateRange) -> Dataset {
        if !range.is_unbounded() {
            dataset
                .records
                .retain(|r| r.date.map_or(false, |d| range.contains(d)));
            return dataset;
        }

        dataset.sort_by_date();

        let distinct: BTreeSet<NaiveDate> = dataset.records.iter().filter_map(|r| r.date).collect();
        let keep: BTreeSet<NaiveDate> = distinct
            .iter()
            .rev()
            .take(self.window_days)
            .copied()
            .collect();

        dataset
            .records
            .retain(|r| r.date.map_or(false, |d| keep.contains(&d)));

        tracing::debug!(
            window_days = self.window_days,
            distinct_dates = distinct.len(),
            kept_rows = dataset.len(),
            "默认时间窗口已应用"
        );

        dataset
    }
}
