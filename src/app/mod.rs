// ==========================================
// 数据平台 - 应用层
// ==========================================
// 职责: HTTP 集成（状态、路由、服务启动）
// ==========================================

pub mod routes;
pub mod server;
pub mod state;

// 重导出
pub use routes::build_router;
pub use server::run;
pub use state::AppState;
