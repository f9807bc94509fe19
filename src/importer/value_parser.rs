// ==========================================
// 数据平台 - 单元格值解析
// ==========================================
// 职责: 宽松的日期/数值解析，失败返回 None（由调用方决定默认值）
// 使用者: RowNormalizer（上传清洗）、ManufacturingLoader（数据集加载）
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 纯日期格式
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// 日期时间格式（只取日期部分）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// 解析日历日期
///
/// 依次尝试: 纯日期格式 → 日期时间格式 → RFC 3339
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// 解析有限实数；空白、非数字、NaN、无穷均返回 None
pub fn parse_finite_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_flexible_date_layouts() {
        assert_eq!(parse_flexible_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_flexible_date("2024/01/05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_flexible_date("20240105"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_flexible_date("01/05/2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(
            parse_flexible_date("2024-01-05 13:45:00"),
            Some(ymd(2024, 1, 5))
        );
        assert_eq!(
            parse_flexible_date("2024-01-05T13:45:00+02:00"),
            Some(ymd(2024, 1, 5))
        );
    }

    #[test]
    fn test_parse_flexible_date_rejects_garbage() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("2024-13-40"), None);
    }

    #[test]
    fn test_parse_finite_number() {
        assert_eq!(parse_finite_number(" 12 "), Some(12.0));
        assert_eq!(parse_finite_number("4.5"), Some(4.5));
        assert_eq!(parse_finite_number("abc"), None);
        assert_eq!(parse_finite_number(""), None);
        assert_eq!(parse_finite_number("NaN"), None);
        assert_eq!(parse_finite_number("inf"), None);
    }
}
