// ==========================================
// 数据平台 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，映射为 HTTP 状态码 + JSON 错误体
// 错误体: {code, message, details?}
//   数据加载失败额外带 error = "Failed to load CSV"
// ==========================================

use crate::demo::DemoError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// 数据加载失败时的固定提示
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load CSV";

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据源错误
    // ==========================================
    #[error("Failed to load CSV: {details}")]
    LoadError { details: String },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::LoadError { .. } => "LOAD_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::SerializationError(msg) => {
                ApiError::DatabaseError(format!("文档序列化失败: {}", msg))
            }
            RepositoryError::MalformedDocument { doc_id, message } => {
                ApiError::DatabaseError(format!("文档损坏(doc_id={}): {}", doc_id, message))
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// 数据源读取/解析失败一律视为加载失败
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::LoadError {
            details: err.to_string(),
        }
    }
}

impl From<DemoError> for ApiError {
    fn from(err: DemoError) -> Self {
        match err {
            DemoError::UnknownType(kind) => {
                ApiError::InvalidInput(format!("Unknown type: {}", kind))
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// JSON 错误体
// ==========================================

/// 错误响应结构
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 简短错误（仅数据加载失败）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// 详细信息（可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let (error, details) = match err {
            ApiError::LoadError { details } => (
                Some(LOAD_ERROR_MESSAGE.to_string()),
                Some(serde_json::Value::String(details.clone())),
            ),
            _ => (None, None),
        };
        ErrorResponse {
            code: err.code().to_string(),
            message: err.to_string(),
            error,
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "请求失败");
        } else {
            tracing::warn!(code = self.code(), error = %self, "请求被拒绝");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
