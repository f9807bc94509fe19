// ==========================================
// 数据平台 - CSV 上传驱动
// ==========================================
// 职责: 把本地 CSV 的每一行以 JSON 对象发送到对应的上传端点
// 文件映射:
//   Manufacturing.csv → upload/manufacturing
//   Sales.csv         → upload/sales
//   Field.csv         → upload/field
//   Testing.csv       → upload/testing
// 约束: 逐行发送，不重试；缺失文件跳过并汇报
// ==========================================

use crate::domain::RecordKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawRecord};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 默认 API 地址
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// 本地文件名 → 记录类型
pub const UPLOAD_MAP: [(&str, RecordKind); 4] = [
    ("Manufacturing.csv", RecordKind::Manufacturing),
    ("Sales.csv", RecordKind::Sales),
    ("Field.csv", RecordKind::Field),
    ("Testing.csv", RecordKind::Testing),
];

/// 单行发送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub status: u16,
    pub body: String,
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 单个文件的上传汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadSummary {
    pub file_name: String,
    pub endpoint: String,
    pub rows_sent: usize,
    pub rows_rejected: usize,
}

/// 目录上传汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryUploadSummary {
    pub uploaded: Vec<FileUploadSummary>,
    pub missing: Vec<PathBuf>,
}

// ==========================================
// RecordUploader Trait
// ==========================================
// 实现者: HttpRecordUploader（测试中可替换为内存实现）
#[async_trait]
pub trait RecordUploader: Send + Sync {
    /// 发送一行到指定端点（相对路径，如 upload/sales）
    async fn send_row(&self, endpoint: &str, row: &RawRecord) -> ImportResult<RowOutcome>;
}

// ==========================================
// HttpRecordUploader - 基于 reqwest 的实现
// ==========================================
pub struct HttpRecordUploader {
    client: reqwest::Client,
    api_base: String,
}

impl HttpRecordUploader {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RecordUploader for HttpRecordUploader {
    async fn send_row(&self, endpoint: &str, row: &RawRecord) -> ImportResult<RowOutcome> {
        let url = format!("{}/{}", self.api_base, endpoint);
        let to_upload_error = |e: reqwest::Error| ImportError::UploadError {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(row)
            .send()
            .await
            .map_err(to_upload_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_upload_error)?;

        Ok(RowOutcome { status, body })
    }
}

/// 上传单个 CSV 文件
pub async fn upload_csv(
    uploader: &dyn RecordUploader,
    file_path: &Path,
    kind: RecordKind,
) -> ImportResult<FileUploadSummary> {
    let endpoint = kind.upload_endpoint();
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::info!("Uploading {} → {}", file_name, endpoint);

    let table = CsvParser.read_verbatim(file_path)?;

    let mut summary = FileUploadSummary {
        file_name,
        endpoint: endpoint.clone(),
        rows_sent: 0,
        rows_rejected: 0,
    };

    for row in &table.rows {
        let outcome = uploader.send_row(&endpoint, row).await?;
        tracing::info!("{} -> {} {}", endpoint, outcome.status, outcome.body.trim());

        summary.rows_sent += 1;
        if !outcome.is_success() {
            summary.rows_rejected += 1;
        }
    }

    Ok(summary)
}

/// 上传目录下所有已知文件；缺失的文件记录后跳过
pub async fn upload_directory(
    uploader: &dyn RecordUploader,
    data_dir: &Path,
) -> ImportResult<DirectoryUploadSummary> {
    let mut result = DirectoryUploadSummary::default();

    for (file_name, kind) in UPLOAD_MAP {
        let path = data_dir.join(file_name);
        if !path.exists() {
            tracing::warn!("Missing: {}", path.display());
            result.missing.push(path);
            continue;
        }

        result.uploaded.push(upload_csv(uploader, &path, kind).await?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录所有调用的内存上传器
    #[derive(Default)]
    struct RecordingUploader {
        calls: Mutex<Vec<(String, RawRecord)>>,
    }

    #[async_trait]
    impl RecordUploader for RecordingUploader {
        async fn send_row(&self, endpoint: &str, row: &RawRecord) -> ImportResult<RowOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), row.clone()));
            let status = if row.get("Region").map(String::as_str) == Some("bad") {
                400
            } else {
                200
            };
            Ok(RowOutcome {
                status,
                body: "{}".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_upload_csv_sends_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sales.csv");
        std::fs::write(&path, "Region,Amount\nWest,10\nbad,3\nEast,2.5\n").unwrap();

        let uploader = RecordingUploader::default();
        let summary = upload_csv(&uploader, &path, RecordKind::Sales).await.unwrap();

        assert_eq!(summary.endpoint, "upload/sales");
        assert_eq!(summary.rows_sent, 3);
        assert_eq!(summary.rows_rejected, 1);

        let calls = uploader.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1.get("Amount"), Some(&"10".to_string()));
    }

    #[tokio::test]
    async fn test_upload_csv_forwards_rows_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Testing.csv");
        std::fs::write(&path, "Suite,Passed\n smoke ,7\n,\n").unwrap();

        let uploader = RecordingUploader::default();
        let summary = upload_csv(&uploader, &path, RecordKind::Testing).await.unwrap();
        assert_eq!(summary.rows_sent, 2);

        let calls = uploader.calls.lock().unwrap();
        assert_eq!(calls[0].1.get("Suite"), Some(&" smoke ".to_string()));
        assert_eq!(calls[1].1.get("Passed"), Some(&String::new()));
    }

    #[tokio::test]
    async fn test_upload_directory_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Field.csv"), "Location\nNorth\n").unwrap();

        let uploader = RecordingUploader::default();
        let summary = upload_directory(&uploader, dir.path()).await.unwrap();

        assert_eq!(summary.uploaded.len(), 1);
        assert_eq!(summary.uploaded[0].endpoint, "upload/field");
        assert_eq!(summary.missing.len(), 3);
        assert!(summary
            .missing
            .iter()
            .any(|p| p.ends_with("Manufacturing.csv")));
    }
}
