// ==========================================
// 数据平台 - 聚合引擎
// ==========================================
// 输入: 窗口内的生产记录
// 输出: KPI / 按日时间序列 / 机组汇总 / 停机时长排名
// 红线: 无状态引擎,所有方法都是纯函数；空输入 → 零值与空序列
// ==========================================

use crate::domain::{Kpis, MachineDowntime, MachineSummary, ProductionRecord, TimeSeries};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 除零保护
pub const DIVISION_EPSILON: f64 = 1e-9;

/// 四舍五入到指定小数位
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// 缺陷率百分比（ε 防止产量为 0 时除零）
pub fn defect_rate_pct(defects: i64, production: i64) -> f64 {
    100.0 * defects as f64 / (production as f64 + DIVISION_EPSILON)
}

/// 分组累计值
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    production: i64,
    defects: i64,
    downtime: f64,
}

impl Totals {
    // 超大计数饱和在 i64 边界，不溢出
    fn add(&mut self, record: &ProductionRecord) {
        self.production = self.production.saturating_add(record.production_count);
        self.defects = self.defects.saturating_add(record.defective_count);
        self.downtime += record.downtime_minutes;
    }
}

// ==========================================
// AggregationEngine
// ==========================================
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算 KPI
    pub fn kpis(&self, records: &[ProductionRecord]) -> Kpis {
        if records.is_empty() {
            return Kpis::default();
        }

        let mut totals = Totals::default();
        for record in records {
            totals.add(record);
        }

        let avg_downtime = totals.downtime / records.len() as f64;

        Kpis {
            total_production: totals.production,
            total_defects: totals.defects,
            defect_rate_pct: round_to(defect_rate_pct(totals.defects, totals.production), 2),
            avg_downtime_minutes: round_to(avg_downtime, 2),
        }
    }

    /// 按日汇总（日期升序，无日期的行不计入）
    pub fn time_series(&self, records: &[ProductionRecord]) -> TimeSeries {
        let mut by_date: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.date {
                by_date.entry(date).or_default().add(record);
            }
        }

        let mut series = TimeSeries::default();
        for (date, totals) in by_date {
            series.dates.push(date.format("%Y-%m-%d").to_string());
            series.production.push(totals.production);
            series.defects.push(totals.defects);
        }
        series
    }

    /// 机组汇总（按机组号升序，缺失机组号的行不计入）
    pub fn by_machine(&self, records: &[ProductionRecord]) -> Vec<MachineSummary> {
        self.group_by_machine(records)
            .into_iter()
            .map(|(machine, totals)| MachineSummary {
                machine,
                production_sum: totals.production,
                defects_sum: totals.defects,
                defect_rate_pct: round_to(defect_rate_pct(totals.defects, totals.production), 2),
                total_downtime: round_to(totals.downtime, 1),
            })
            .collect()
    }

    /// 停机时长排名（降序；相同时长按机组号升序）
    pub fn downtime_ranking(&self, records: &[ProductionRecord]) -> Vec<MachineDowntime> {
        let mut ranking: Vec<MachineDowntime> = self
            .group_by_machine(records)
            .into_iter()
            .map(|(machine, totals)| MachineDowntime {
                machine,
                total_downtime: totals.downtime,
            })
            .collect();

        // 稳定排序，保留机组号升序作为并列次序
        ranking.sort_by(|a, b| b.total_downtime.total_cmp(&a.total_downtime));
        ranking
    }

    fn group_by_machine(&self, records: &[ProductionRecord]) -> BTreeMap<String, Totals> {
        let mut groups: BTreeMap<String, Totals> = BTreeMap::new();
        for record in records {
            if let Some(machine) = &record.machine_id {
                groups.entry(machine.clone()).or_default().add(record);
            }
        }
        groups
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}
