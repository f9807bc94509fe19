// ==========================================
// 数据平台 - API 层
// ==========================================
// 职责: 业务 API 接口，供 HTTP 路由调用
// 约束: 同步执行，由路由层放入阻塞线程池
// ==========================================

pub mod analytics_api;
pub mod demo_api;
pub mod error;
pub mod record_api;

// 重导出核心类型
pub use analytics_api::{AnalyticsApi, ReportQuery};
pub use demo_api::{DemoApi, DemoBatchResponse};
pub use error::{ApiError, ApiResult, ErrorResponse, LOAD_ERROR_MESSAGE};
pub use record_api::{RecordApi, UploadResponse};
