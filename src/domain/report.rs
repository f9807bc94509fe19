// ==========================================
// 数据平台 - 制造分析报告
// ==========================================
// 报告由相互独立的分区组成，所有字段始终存在:
// 空窗口 → 空序列 / 零值，而不是缺失键
// ==========================================

use crate::domain::production::SampleRow;
use serde::{Deserialize, Serialize};

/// 关键指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub total_production: i64,
    pub total_defects: i64,
    pub defect_rate_pct: f64,
    pub avg_downtime_minutes: f64,
}

/// 按日时间序列（三个序列按下标对齐）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub dates: Vec<String>,
    pub production: Vec<i64>,
    pub defects: Vec<i64>,
}

/// 机组汇总行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSummary {
    pub machine: String,
    pub production_sum: i64,
    pub defects_sum: i64,
    pub defect_rate_pct: f64,
    pub total_downtime: f64,
}

/// 机组停机时长排名行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDowntime {
    pub machine: String,
    pub total_downtime: f64,
}

/// 制造分析报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingReport {
    pub kpis: Kpis,
    pub time_series: TimeSeries,
    pub by_machine: Vec<MachineSummary>,
    pub downtime_by_machine: Vec<MachineDowntime>,
    pub conclusions: Vec<String>,
    pub sample: Vec<SampleRow>,
}
