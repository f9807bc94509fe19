// ==========================================
// 数据平台 - 文档存储
// ==========================================
// 职责: 按集合名追加/读取任意键值文档
// 约束: 不做 schema 校验，不做批量/重试；每次写入一条语句
// 存储: documents 表 (doc_id, collection, body_json, created_at)
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::Document;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// DocumentStore Trait
// ==========================================
// 实现者: SqliteDocumentStore
pub trait DocumentStore: Send + Sync {
    /// 向集合追加一个文档
    ///
    /// # 返回
    /// - Ok(doc_id): 存储分配的文档 ID
    fn add(&self, collection: &str, doc: &Document) -> RepositoryResult<String>;

    /// 读取集合中的全部文档
    ///
    /// 说明: 调用方不应依赖返回顺序
    fn stream(&self, collection: &str) -> RepositoryResult<Vec<Document>>;
}

// ==========================================
// SqliteDocumentStore - SQLite 文档存储
// ==========================================
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// 打开（必要时创建）文档库
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 内存库（测试与临时运行）
    pub fn open_in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建，并确保表结构存在
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 统计集合文档数量
    pub fn count(&self, collection: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn add(&self, collection: &str, doc: &Document) -> RepositoryResult<String> {
        let doc_id = Uuid::new_v4().to_string();
        let body_json = serde_json::to_string(doc)?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO documents (doc_id, collection, body_json, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![doc_id, collection, body_json, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!(collection, doc_id = %doc_id, "文档已写入");
        Ok(doc_id)
    }

    fn stream(&self, collection: &str) -> RepositoryResult<Vec<Document>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT doc_id, body_json FROM documents WHERE collection = ?1 ORDER BY rowid",
        )?;

        let rows = stmt.query_map(params![collection], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut docs = Vec::new();
        for row in rows {
            let (doc_id, body_json) = row?;
            match serde_json::from_str::<Value>(&body_json)? {
                Value::Object(map) => docs.push(map),
                other => {
                    return Err(RepositoryError::MalformedDocument {
                        doc_id,
                        message: format!("期望 JSON 对象，实际为 {}", other),
                    })
                }
            }
        }

        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_add_then_stream_returns_documents_of_that_collection_only() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();

        let id1 = store
            .add("sales", &doc(json!({"Region": "West", "Amount": 10})))
            .unwrap();
        let id2 = store
            .add("sales", &doc(json!({"Region": "East", "Amount": 2.5})))
            .unwrap();
        store.add("field", &doc(json!({"Location": "A"}))).unwrap();

        assert_ne!(id1, id2);

        let sales = store.stream("sales").unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0]["Region"], json!("West"));
        assert_eq!(sales[1]["Amount"], json!(2.5));

        assert_eq!(store.count("field").unwrap(), 1);
        assert!(store.stream("testing").unwrap().is_empty());
    }

    #[test]
    fn test_stream_rejects_non_object_body() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        {
            let conn = store.get_conn().unwrap();
            conn.execute(
                "INSERT INTO documents (doc_id, collection, body_json, created_at) VALUES ('x', 'sales', '[1,2]', 'now')",
                [],
            )
            .unwrap();
        }

        let err = store.stream("sales").unwrap_err();
        assert!(matches!(err, RepositoryError::MalformedDocument { .. }));
    }
}
