// ==========================================
// 数据平台 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析，输出表头 + 原始行（列名 → 字符串值）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行（列名 → 字符串值）
pub type RawRecord = HashMap<String, String>;

/// 原始表格
///
/// 表头单独保留：即使没有数据行，也能判断某列是否存在
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头与行记录（完全空白的行已跳过）
    /// - Err: 文件不存在、格式错误、读取失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

/// 把一行单元格按表头装配为 RawRecord；整行空白时返回 None
fn assemble_row<I>(headers: &[String], cells: I) -> Option<RawRecord>
where
    I: IntoIterator<Item = String>,
{
    let mut row_map = HashMap::new();
    for (col_idx, value) in cells.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            row_map.insert(header.clone(), value.trim().to_string());
        }
    }

    // 跳过完全空白的行
    if row_map.values().all(|v| v.is_empty()) {
        None
    } else {
        Some(row_map)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 原样读取 CSV：单元格不去空白，各列皆空的行也保留
    ///
    /// 上传驱动用它逐行转发数据，规范化留给服务端
    pub fn read_verbatim(&self, file_path: &Path) -> ImportResult<RawTable> {
        let mut reader = Self::open_reader(file_path)?;
        let headers = Self::read_headers(&mut reader)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRecord = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            rows.push(row);
        }

        Ok(RawTable { headers, rows })
    }

    fn open_reader(path: &Path) -> ImportResult<csv::Reader<File>> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        Ok(ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file))
    }

    fn read_headers(reader: &mut csv::Reader<File>) -> ImportResult<Vec<String>> {
        Ok(reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect())
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let mut reader = Self::open_reader(file_path)?;
        let headers = Self::read_headers(&mut reader)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if let Some(row) = assemble_row(&headers, record.iter().map(str::to_string)) {
                rows.push(row);
            }
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // open_workbook_auto 按扩展名选择 xlsx/xls 读取器
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in rows_iter {
            if let Some(row) = assemble_row(&headers, data_row.iter().map(|c| c.to_string())) {
                rows.push(row);
            }
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(file_path),
            _ => {
                if !file_path.exists() {
                    return Err(ImportError::FileNotFound(file_path.display().to_string()));
                }
                Err(ImportError::UnsupportedFormat(ext))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Date,Machine_ID,Production_Count").unwrap();
        writeln!(temp_file, "2024-01-01, M1 ,10").unwrap();
        writeln!(temp_file, "2024-01-02,M2,20").unwrap();

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["Date", "Machine_ID", "Production_Count"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Machine_ID"), Some(&"M1".to_string()));
        assert_eq!(table.rows[1].get("Production_Count"), Some(&"20".to_string()));
        assert!(table.has_column("Date"));
        assert!(!table.has_column("Downtime_Minutes"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows_and_short_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Date,Machine_ID").unwrap();
        writeln!(temp_file, "2024-01-01,M1").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "2024-01-03").unwrap(); // 短行

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("Machine_ID"), None);
    }

    #[test]
    fn test_csv_read_verbatim_keeps_cells_as_written() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Region,Units").unwrap();
        writeln!(temp_file, " West ,12").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "East").unwrap(); // 短行

        let table = CsvParser.read_verbatim(temp_file.path()).unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].get("Region"), Some(&" West ".to_string()));
        assert_eq!(table.rows[1].get("Region"), Some(&String::new()));
        assert_eq!(table.rows[1].get("Units"), Some(&String::new()));
        assert_eq!(table.rows[2].get("Units"), None);
    }

    #[test]
    fn test_csv_parser_header_only() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Date,Production_Count").unwrap();

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();
        assert!(table.rows.is_empty());
        assert!(table.has_column("Production_Count"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let result = UniversalFileParser.parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
