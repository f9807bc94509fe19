// ==========================================
// 数据平台 - 记录上传/查询 API
// ==========================================
// 职责: 四类记录的上传（清洗后追加）、全量查询、通用摘要
// 存储: DocumentStore，集合名 = 记录类型名
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Document, RecordKind};
use crate::engine::summary::{summarize, DataSummary};
use crate::importer::RowNormalizer;
use crate::repository::DocumentStore;

/// 上传成功响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
}

impl UploadResponse {
    fn success(kind: RecordKind) -> Self {
        Self {
            status: "success".to_string(),
            message: format!("{} data uploaded.", kind.label()),
        }
    }
}

// ==========================================
// RecordApi - 记录 API
// ==========================================
pub struct RecordApi {
    store: Arc<dyn DocumentStore>,
    normalizer: RowNormalizer,
}

impl RecordApi {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            normalizer: RowNormalizer::new(),
        }
    }

    /// 上传单条记录
    ///
    /// # 参数
    /// - kind: 记录类型
    /// - body: 请求体（必须是 JSON 对象）
    pub fn upload(&self, kind: RecordKind, body: Value) -> ApiResult<UploadResponse> {
        let Value::Object(doc) = body else {
            return Err(ApiError::InvalidInput(format!(
                "{} 上传内容必须是 JSON 对象",
                kind.label()
            )));
        };

        let cleaned = self.normalizer.normalize(&doc);
        let doc_id = self.store.add(kind.collection(), &cleaned)?;

        tracing::debug!(collection = kind.collection(), doc_id = %doc_id, "记录已写入");
        Ok(UploadResponse::success(kind))
    }

    /// 查询集合全部记录（不分页）
    pub fn list(&self, kind: RecordKind) -> ApiResult<Vec<Document>> {
        Ok(self.store.stream(kind.collection())?)
    }

    /// 集合通用摘要
    pub fn summarize(&self, kind: RecordKind) -> ApiResult<DataSummary> {
        let records = self.store.stream(kind.collection())?;
        Ok(summarize(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SqliteDocumentStore;
    use serde_json::json;

    fn api() -> RecordApi {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        RecordApi::new(Arc::new(store))
    }

    #[test]
    fn test_upload_normalizes_and_appends() {
        let api = api();
        let resp = api
            .upload(
                RecordKind::Sales,
                json!({"Date": "2024/01/05", "Units": "12", "Price": "1.5", "Region": "West", "Note": ""}),
            )
            .unwrap();
        assert_eq!(resp.status, "success");
        assert_eq!(resp.message, "Sales data uploaded.");

        let docs = api.list(RecordKind::Sales).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["Date"], json!("2024-01-05"));
        assert_eq!(docs[0]["Units"], json!(12));
        assert_eq!(docs[0]["Price"], json!(1.5));
        assert_eq!(docs[0]["Region"], json!("West"));
        assert_eq!(docs[0]["Note"], Value::Null);

        assert!(api.list(RecordKind::Field).unwrap().is_empty());
    }

    #[test]
    fn test_upload_rejects_non_object() {
        let err = api().upload(RecordKind::Testing, json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_summarize_collection() {
        let api = api();
        api.upload(RecordKind::Field, json!({"Sensor": "S1", "Reading": "3"})).unwrap();
        api.upload(RecordKind::Field, json!({"Sensor": "S2", "Reading": "5"})).unwrap();

        let summary = api.summarize(RecordKind::Field).unwrap();
        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.columns, vec!["Reading", "Sensor"]);
        let numeric = summary.numeric_summary.unwrap();
        assert_eq!(numeric["Reading"].mean, 4.0);
    }
}
