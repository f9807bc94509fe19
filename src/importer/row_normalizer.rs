// ==========================================
// 数据平台 - 行清洗器
// ==========================================
// 职责: 上传记录落库前的尽力类型转换
// - 空值 / 空白字符串 → null
// - 含 '.' 的文本按浮点解析，否则按整数解析
// - 键名含 date 的文本按日期解析并统一为 YYYY-MM-DD
// - 其余值原样保留
// 约束: 任何单元格解析失败都不报错，只是不转换
// ==========================================

use crate::domain::Document;
use crate::importer::value_parser::parse_flexible_date;
use serde_json::{Number, Value};

pub struct RowNormalizer;

impl Default for RowNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RowNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 清洗一条记录
    pub fn normalize(&self, row: &Document) -> Document {
        row.iter()
            .map(|(key, value)| (key.clone(), self.normalize_value(key, value)))
            .collect()
    }

    /// 清洗单个字段值
    pub fn normalize_value(&self, key: &str, value: &Value) -> Value {
        let text = match value {
            Value::Null => return Value::Null,
            Value::String(s) => s,
            // 数值、布尔、数组、对象不做转换
            other => return other.clone(),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }

        if let Some(number) = self.parse_number(trimmed) {
            return Value::Number(number);
        }

        if key.to_lowercase().contains("date") {
            if let Some(date) = parse_flexible_date(trimmed) {
                return Value::String(date.format("%Y-%m-%d").to_string());
            }
        }

        value.clone()
    }

    /// 含小数点 → 浮点；否则 → 整数
    fn parse_number(&self, text: &str) -> Option<Number> {
        if text.contains('.') {
            text.parse::<f64>().ok().and_then(Number::from_f64)
        } else {
            text.parse::<i64>().ok().map(Number::from)
        }
    }
}

/// 清洗一条记录（便捷函数）
pub fn clean_row(row: &Document) -> Document {
    RowNormalizer.normalize(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_and_null_become_null() {
        let cleaned = clean_row(&doc(json!({"a": "", "b": null, "c": "   "})));
        assert_eq!(cleaned["a"], Value::Null);
        assert_eq!(cleaned["b"], Value::Null);
        assert_eq!(cleaned["c"], Value::Null);
    }

    #[test]
    fn test_numeric_text_is_coerced() {
        let cleaned = clean_row(&doc(json!({
            "Units": "12",
            "Price": "1.5",
            "Neg": "-3",
            "Padded": " 7 ",
            "Version": "1.2.3"
        })));
        assert_eq!(cleaned["Units"], json!(12));
        assert_eq!(cleaned["Price"], json!(1.5));
        assert_eq!(cleaned["Neg"], json!(-3));
        assert_eq!(cleaned["Padded"], json!(7));
        // 不是合法数字 → 原样保留
        assert_eq!(cleaned["Version"], json!("1.2.3"));
    }

    #[test]
    fn test_date_keys_are_normalized() {
        let cleaned = clean_row(&doc(json!({
            "Order_Date": "2024/01/05",
            "ship date": "01/07/2024 10:30",
            "Bad_Date": "someday",
            "Comment": "2024/01/05"
        })));
        assert_eq!(cleaned["Order_Date"], json!("2024-01-05"));
        assert_eq!(cleaned["ship date"], json!("2024-01-07"));
        assert_eq!(cleaned["Bad_Date"], json!("someday"));
        // 非日期键不做日期转换
        assert_eq!(cleaned["Comment"], json!("2024/01/05"));
    }

    #[test]
    fn test_numeric_wins_over_date_for_compact_dates() {
        let cleaned = clean_row(&doc(json!({"Date": "20240105"})));
        assert_eq!(cleaned["Date"], json!(20240105));
    }

    #[test]
    fn test_non_text_values_pass_through() {
        let cleaned = clean_row(&doc(json!({
            "n": 3,
            "f": 2.5,
            "flag": true,
            "tags": ["a", "b"],
            "meta": {"k": "v"}
        })));
        assert_eq!(cleaned["n"], json!(3));
        assert_eq!(cleaned["f"], json!(2.5));
        assert_eq!(cleaned["flag"], json!(true));
        assert_eq!(cleaned["tags"], json!(["a", "b"]));
        assert_eq!(cleaned["meta"], json!({"k": "v"}));
    }
}
