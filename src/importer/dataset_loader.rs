// ==========================================
// 数据平台 - 制造数据集加载器
// ==========================================
// 流程: 文件解析 → 日期解析 → 数值列强制转换 → 机组号补齐
// 规则:
// - Date 无法解析 → None（行保留）
// - Production_Count / Defective_Count / Downtime_Minutes 解析失败 → 0
// - 数据源完全没有 Machine_ID 列 → 每行补 "Unknown"
//   （列存在但单元格为空时保持缺失）
// ==========================================

use crate::domain::production::{
    COL_DATE, COL_DEFECTIVE_COUNT, COL_DOWNTIME_MINUTES, COL_MACHINE_ID, COL_PRODUCTION_COUNT,
};
use crate::domain::{Dataset, ProductionRecord, UNKNOWN_MACHINE};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{FileParser, RawRecord, RawTable, UniversalFileParser};
use crate::importer::value_parser::{parse_finite_number, parse_flexible_date};
use std::path::Path;

/// 已识别列（其余列进入 extra）
const KNOWN_COLUMNS: [&str; 5] = [
    COL_DATE,
    COL_MACHINE_ID,
    COL_PRODUCTION_COUNT,
    COL_DEFECTIVE_COUNT,
    COL_DOWNTIME_MINUTES,
];

// ==========================================
// ManufacturingLoader - 制造数据集加载器
// ==========================================
pub struct ManufacturingLoader {
    parser: Box<dyn FileParser>,
}

impl Default for ManufacturingLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManufacturingLoader {
    /// 使用通用文件解析器（按扩展名选择 CSV / Excel）
    pub fn new() -> Self {
        Self {
            parser: Box::new(UniversalFileParser),
        }
    }

    /// 使用指定解析器
    pub fn with_parser(parser: Box<dyn FileParser>) -> Self {
        Self { parser }
    }

    /// 加载数据集
    ///
    /// # 返回
    /// - Ok(Dataset): 未排序的数据集
    /// - Err(ImportError): 文件不存在/不可读/格式错误
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ImportResult<Dataset> {
        let path = path.as_ref();
        let table = self.parser.parse_to_raw_table(path)?;

        tracing::debug!(
            source = %path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            "制造数据源已解析"
        );

        Ok(Self::from_table(&table))
    }

    /// 从原始表格构建数据集
    pub fn from_table(table: &RawTable) -> Dataset {
        let has_machine_column = table.has_column(COL_MACHINE_ID);

        let records = table
            .rows
            .iter()
            .map(|row| Self::map_row(row, has_machine_column))
            .collect();

        Dataset::new(records)
    }

    fn map_row(row: &RawRecord, has_machine_column: bool) -> ProductionRecord {
        let cell = |name: &str| row.get(name).map(String::as_str).unwrap_or("");

        let date = parse_flexible_date(cell(COL_DATE));

        let machine_id = if has_machine_column {
            Some(cell(COL_MACHINE_ID).trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        } else {
            Some(UNKNOWN_MACHINE.to_string())
        };

        let extra = row
            .iter()
            .filter(|(k, _)| !KNOWN_COLUMNS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        ProductionRecord {
            date,
            machine_id,
            production_count: coerce_count(cell(COL_PRODUCTION_COUNT)),
            defective_count: coerce_count(cell(COL_DEFECTIVE_COUNT)),
            downtime_minutes: parse_finite_number(cell(COL_DOWNTIME_MINUTES)).unwrap_or(0.0),
            extra,
        }
    }
}

/// 计数列: 解析失败 → 0；小数文本截断为整数；超出 i64 范围的值饱和到边界
fn coerce_count(value: &str) -> i64 {
    parse_finite_number(value)
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|cells| {
                headers
                    .iter()
                    .cloned()
                    .zip(cells.iter().map(|c| c.to_string()))
                    .collect::<HashMap<_, _>>()
            })
            .collect();
        RawTable { headers, rows }
    }

    #[test]
    fn test_dirty_numeric_cells_become_zero() {
        let t = table(
            &["Date", "Machine_ID", "Production_Count", "Defective_Count", "Downtime_Minutes"],
            &[
                &["2024-01-01", "M1", "abc", "", "n/a"],
                &["2024-01-02", "M2", "12.7", "3", "4.25"],
            ],
        );

        let ds = ManufacturingLoader::from_table(&t);
        assert_eq!(ds.len(), 2);

        let first = &ds.records[0];
        assert_eq!(first.production_count, 0);
        assert_eq!(first.defective_count, 0);
        assert_eq!(first.downtime_minutes, 0.0);

        let second = &ds.records[1];
        assert_eq!(second.production_count, 12);
        assert_eq!(second.defective_count, 3);
        assert_eq!(second.downtime_minutes, 4.25);
    }

    #[test]
    fn test_huge_count_cell_saturates() {
        let t = table(
            &["Date", "Machine_ID", "Production_Count"],
            &[&["2024-01-01", "M1", "1e300"], &["2024-01-02", "M1", "-1e300"]],
        );
        let ds = ManufacturingLoader::from_table(&t);
        assert_eq!(ds.records[0].production_count, i64::MAX);
        assert_eq!(ds.records[1].production_count, i64::MIN);
    }

    #[test]
    fn test_missing_numeric_columns_become_zero() {
        let t = table(&["Date", "Machine_ID"], &[&["2024-01-01", "M1"]]);
        let ds = ManufacturingLoader::from_table(&t);

        assert_eq!(ds.records[0].production_count, 0);
        assert_eq!(ds.records[0].defective_count, 0);
        assert_eq!(ds.records[0].downtime_minutes, 0.0);
    }

    #[test]
    fn test_unparsable_date_is_kept_as_none() {
        let t = table(
            &["Date", "Machine_ID", "Production_Count"],
            &[&["yesterday", "M1", "5"], &["2024-02-29", "M1", "6"]],
        );
        let ds = ManufacturingLoader::from_table(&t);

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].date, None);
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_absent_machine_column_is_synthesized() {
        let t = table(&["Date", "Production_Count"], &[&["2024-01-01", "5"]]);
        let ds = ManufacturingLoader::from_table(&t);
        assert_eq!(ds.records[0].machine_id.as_deref(), Some(UNKNOWN_MACHINE));
    }

    #[test]
    fn test_blank_machine_cell_stays_missing() {
        let t = table(
            &["Date", "Machine_ID", "Production_Count"],
            &[&["2024-01-01", "", "5"]],
        );
        let ds = ManufacturingLoader::from_table(&t);
        assert_eq!(ds.records[0].machine_id, None);
    }

    #[test]
    fn test_extra_columns_are_carried() {
        let t = table(
            &["Date", "Machine_ID", "Operator"],
            &[&["2024-01-01", "M1", "Ana"]],
        );
        let ds = ManufacturingLoader::from_table(&t);
        assert_eq!(ds.records[0].extra.get("Operator"), Some(&"Ana".to_string()));
        assert!(!ds.records[0].extra.contains_key("Machine_ID"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let loader = ManufacturingLoader::new();
        assert!(loader.load("does/not/exist.csv").is_err());
    }
}
