// ==========================================
// 数据平台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑（清洗在导入层完成）
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod document_repo;
pub mod error;

// 重导出
pub use document_repo::{DocumentStore, SqliteDocumentStore};
pub use error::{RepositoryError, RepositoryResult};
