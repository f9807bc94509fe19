// ==========================================
// 数据平台 - 领域层
// ==========================================
// 职责: 定义领域实体与类型
// 约束: 不依赖数据库与 HTTP
// ==========================================

pub mod production;
pub mod report;
pub mod types;

use serde_json::{Map, Value};

/// 文档（任意键值记录，存储层原样保存）
pub type Document = Map<String, Value>;

// 重导出核心类型
pub use production::{Dataset, ProductionRecord, SampleRow, UNKNOWN_MACHINE};
pub use report::{Kpis, MachineDowntime, MachineSummary, ManufacturingReport, TimeSeries};
pub use types::RecordKind;
