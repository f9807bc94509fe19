// ==========================================
// 数据平台 - 生产记录与数据集
// ==========================================
// 生产记录: 制造数据源中的一行
// 数据集: 每次分析请求现建现弃，请求内只读
// ==========================================

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ===== 数据源列名 =====
pub const COL_DATE: &str = "Date";
pub const COL_MACHINE_ID: &str = "Machine_ID";
pub const COL_PRODUCTION_COUNT: &str = "Production_Count";
pub const COL_DEFECTIVE_COUNT: &str = "Defective_Count";
pub const COL_DOWNTIME_MINUTES: &str = "Downtime_Minutes";

/// 数据源缺少机组列时的统一机组号
pub const UNKNOWN_MACHINE: &str = "Unknown";

/// 样本行（列名 → 值）
pub type SampleRow = Map<String, Value>;

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    /// 日期；无法解析时为 None（排序在最后，不参与按日期的计算）
    pub date: Option<NaiveDate>,
    /// 机组号；列存在但单元格为空时为 None
    pub machine_id: Option<String>,
    pub production_count: i64,
    pub defective_count: i64,
    pub downtime_minutes: f64,
    /// 其余列原样保留（仅用于样本输出）
    pub extra: BTreeMap<String, String>,
}

impl ProductionRecord {
    pub fn new(
        date: Option<NaiveDate>,
        machine_id: Option<&str>,
        production_count: i64,
        defective_count: i64,
        downtime_minutes: f64,
    ) -> Self {
        Self {
            date,
            machine_id: machine_id.map(str::to_string),
            production_count,
            defective_count,
            downtime_minutes,
            extra: BTreeMap::new(),
        }
    }

    /// 转换为样本行，键使用数据源列名
    pub fn to_sample_row(&self) -> SampleRow {
        let mut row = Map::new();
        for (k, v) in &self.extra {
            row.insert(k.clone(), Value::String(v.clone()));
        }

        row.insert(
            COL_DATE.to_string(),
            self.date
                .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Null),
        );
        row.insert(
            COL_MACHINE_ID.to_string(),
            self.machine_id
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        row.insert(
            COL_PRODUCTION_COUNT.to_string(),
            Value::from(self.production_count),
        );
        row.insert(
            COL_DEFECTIVE_COUNT.to_string(),
            Value::from(self.defective_count),
        );
        row.insert(
            COL_DOWNTIME_MINUTES.to_string(),
            Value::from(self.downtime_minutes),
        );
        row
    }
}

// ==========================================
// Dataset - 数据集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<ProductionRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ProductionRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按日期升序稳定排序，无日期的行排在最后
    pub fn sort_by_date(&mut self) {
        self.records.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
}
