// ==========================================
// 数据平台 - 导入层
// ==========================================
// 职责: 外部数据进入系统前的解析与清洗
// - 文件解析（CSV / Excel）
// - 上传记录清洗（RowNormalizer）
// - 制造数据集加载（ManufacturingLoader）
// - 本地 CSV 批量上传驱动
// ==========================================

pub mod dataset_loader;
pub mod error;
pub mod file_parser;
pub mod row_normalizer;
pub mod uploader;
pub mod value_parser;

// 重导出核心类型
pub use dataset_loader::ManufacturingLoader;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawTable, UniversalFileParser};
pub use row_normalizer::{clean_row, RowNormalizer};
pub use uploader::{
    upload_csv, upload_directory, DirectoryUploadSummary, FileUploadSummary, HttpRecordUploader,
    RecordUploader, RowOutcome,
};
pub use value_parser::{parse_finite_number, parse_flexible_date};
