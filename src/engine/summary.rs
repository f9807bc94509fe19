// ==========================================
// 数据平台 - 通用数据摘要
// ==========================================
// 用于 sales / field / testing 集合的分析端点
// 输出: 行数、列名、每列缺失数、数值列描述统计
// 数值列: 所有非空值均为数字且至少有一个值
// ==========================================

use crate::domain::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// 数值列描述统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    /// 样本标准差（n-1），少于 2 个值时为 null
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

/// 数据摘要
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub missing_values: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<BTreeMap<String, NumericStats>>,
}

/// 生成数据摘要
pub fn summarize(records: &[Document]) -> DataSummary {
    let columns: BTreeSet<String> = records.iter().flat_map(|r| r.keys().cloned()).collect();

    let mut missing_values = BTreeMap::new();
    let mut numeric_summary = BTreeMap::new();

    for column in &columns {
        let present: Vec<&Value> = records
            .iter()
            .filter_map(|r| r.get(column))
            .filter(|v| !v.is_null())
            .collect();

        missing_values.insert(column.clone(), records.len() - present.len());

        if present.is_empty() || !present.iter().all(|v| v.is_number()) {
            continue;
        }

        let values: Vec<f64> = present.iter().filter_map(|v| v.as_f64()).collect();
        if let Some(stats) = describe(&values) {
            numeric_summary.insert(column.clone(), stats);
        }
    }

    DataSummary {
        total_rows: records.len(),
        columns: columns.into_iter().collect(),
        missing_values,
        numeric_summary: if numeric_summary.is_empty() {
            None
        } else {
            Some(numeric_summary)
        },
    }
}

/// 描述统计；空输入返回 None
pub fn describe(values: &[f64]) -> Option<NumericStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        None
    } else {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        Some(var.sqrt())
    };

    Some(NumericStats {
        count: n,
        mean,
        std,
        min: sorted[0],
        p25: percentile(&sorted, 25.0),
        p50: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        max: sorted[n - 1],
    })
}

/// 线性插值分位数（输入已排序）
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi || hi >= sorted.len() {
        return sorted[lo.min(sorted.len() - 1)];
    }
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs(values: Vec<Value>) -> Vec<Document> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_summary_counts_rows_columns_and_missing() {
        let records = docs(vec![
            json!({"Region": "West", "Amount": 10}),
            json!({"Region": null, "Amount": 20}),
            json!({"Amount": 30, "Note": "x"}),
        ]);
        let summary = summarize(&records);

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.columns, vec!["Amount", "Note", "Region"]);
        assert_eq!(summary.missing_values["Region"], 2);
        assert_eq!(summary.missing_values["Note"], 2);
        assert_eq!(summary.missing_values["Amount"], 0);

        let numeric = summary.numeric_summary.unwrap();
        assert_eq!(numeric.len(), 1);
        let amount = &numeric["Amount"];
        assert_eq!(amount.count, 3);
        assert_eq!(amount.mean, 20.0);
        assert_eq!(amount.std, Some(10.0));
        assert_eq!(amount.min, 10.0);
        assert_eq!(amount.p25, 15.0);
        assert_eq!(amount.p50, 20.0);
        assert_eq!(amount.p75, 25.0);
        assert_eq!(amount.max, 30.0);
    }

    #[test]
    fn test_mixed_column_is_not_numeric() {
        let records = docs(vec![json!({"v": 1}), json!({"v": "two"})]);
        let summary = summarize(&records);
        assert!(summary.numeric_summary.is_none());

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("numeric_summary").is_none());
    }

    #[test]
    fn test_single_value_has_no_std() {
        let stats = describe(&[4.0]).unwrap();
        assert_eq!(stats.std, None);
        assert_eq!(stats.p75, 4.0);
    }

    #[test]
    fn test_empty_collection() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_rows, 0);
        assert!(summary.columns.is_empty());
        assert!(summary.numeric_summary.is_none());
    }

    #[test]
    fn test_quartile_keys_serialize_with_percent() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["25%"], json!(1.75));
        assert_eq!(value["50%"], json!(2.5));
    }
}
