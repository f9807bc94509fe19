// ==========================================
// 数据平台 - 引擎层
// ==========================================
// 职责: 纯计算（窗口、聚合、趋势、报告、摘要）
// 红线: Engine 不访问数据库、不读文件
// ==========================================

pub mod aggregation;
pub mod report;
pub mod summary;
pub mod trend;
pub mod window;

// 重导出核心引擎
pub use aggregation::{defect_rate_pct, round_to, AggregationEngine, DIVISION_EPSILON};
pub use report::ReportAssembler;
pub use summary::{describe, summarize, DataSummary, NumericStats};
pub use trend::{TrendDirection, TrendNarrator, TREND_THRESHOLD};
pub use window::{DateRange, TimeWindowSelector};
