// ==========================================
// 数据平台 - 多态演示
// ==========================================
// 四种记录类型的封闭枚举，统一由 process() 按标签分派
// 只做字符串格式化，不做任何计算
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// 默认来源
pub const DEFAULT_SOURCE: &str = "DemoSource";

/// load() 回显的最大字符数
const LOAD_PREVIEW_CHARS: usize = 80;

/// 演示模块错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemoError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
}

/// 演示请求项
///
/// 例: {"type":"manufacturing","source":"Factory_DB","meta":{"machine_id":"MC-110"},"data":" raw payload "}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoItem {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// 批量演示请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoBatchRequest {
    #[serde(default)]
    pub items: Vec<DemoItem>,
}

/// 公共部分: 来源 + 原始载荷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPayload {
    pub source: String,
    raw: Option<String>,
}

impl DemoPayload {
    fn new(source: String) -> Self {
        Self { source, raw: None }
    }
}

// ==========================================
// DemoRecord - 演示记录（封闭集合）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoRecord {
    Manufacturing { payload: DemoPayload, machine_id: String },
    Sales { payload: DemoPayload, region: String },
    Testing { payload: DemoPayload, test_suite: String },
    Field { payload: DemoPayload, location: String },
}

impl DemoRecord {
    /// 按类型标签构造；未知类型立即失败
    pub fn instantiate(
        kind: Option<&str>,
        source: Option<&str>,
        meta: Option<&Map<String, Value>>,
    ) -> Result<Self, DemoError> {
        let payload = DemoPayload::new(source.unwrap_or(DEFAULT_SOURCE).to_string());
        let meta_or = |key: &str, default: &str| {
            meta.and_then(|m| m.get(key))
                .and_then(value_text)
                .unwrap_or_else(|| default.to_string())
        };

        match kind {
            Some("manufacturing") => Ok(DemoRecord::Manufacturing {
                payload,
                machine_id: meta_or("machine_id", "UNKNOWN"),
            }),
            Some("sales") => Ok(DemoRecord::Sales {
                payload,
                region: meta_or("region", "GLOBAL"),
            }),
            Some("testing") => Ok(DemoRecord::Testing {
                payload,
                test_suite: meta_or("test_suite", "DEFAULT"),
            }),
            Some("field") => Ok(DemoRecord::Field {
                payload,
                location: meta_or("location", "UNKNOWN"),
            }),
            other => Err(DemoError::UnknownType(other.unwrap_or("").to_string())),
        }
    }

    /// 从请求项构造并挂载数据
    pub fn from_item(item: &DemoItem) -> Result<Self, DemoError> {
        let mut record = Self::instantiate(
            item.kind.as_deref(),
            item.source.as_deref(),
            item.meta.as_ref(),
        )?;
        let data = item.data.as_ref().and_then(value_text).unwrap_or_default();
        record.load(&data);
        Ok(record)
    }

    fn payload(&self) -> &DemoPayload {
        match self {
            DemoRecord::Manufacturing { payload, .. }
            | DemoRecord::Sales { payload, .. }
            | DemoRecord::Testing { payload, .. }
            | DemoRecord::Field { payload, .. } => payload,
        }
    }

    fn payload_mut(&mut self) -> &mut DemoPayload {
        match self {
            DemoRecord::Manufacturing { payload, .. }
            | DemoRecord::Sales { payload, .. }
            | DemoRecord::Testing { payload, .. }
            | DemoRecord::Field { payload, .. } => payload,
        }
    }

    pub fn source(&self) -> &str {
        &self.payload().source
    }

    /// 挂载原始数据
    pub fn load(&mut self, data: &str) -> String {
        self.payload_mut().raw = Some(data.to_string());
        let preview: String = data.chars().take(LOAD_PREVIEW_CHARS).collect();
        format!("Loaded data: {}", preview)
    }

    /// 通用清洗
    pub fn clean(&self) -> String {
        match &self.payload().raw {
            None => "No data to clean".to_string(),
            Some(raw) => format!("Cleaned: {}", raw.trim()),
        }
    }

    /// 按类型处理
    pub fn process(&self) -> Value {
        let cleaned = self.clean();
        match self {
            DemoRecord::Manufacturing { machine_id, .. } => json!({
                "type": "manufacturing",
                "machine_id": machine_id,
                "cleaned": cleaned,
                "analysis": format!("Manufacturing analysis for {}: OK", machine_id),
            }),
            DemoRecord::Sales { region, .. } => json!({
                "type": "sales",
                "region": region,
                "cleaned": cleaned,
                "summary": format!("Sales summary for {}: total_orders=123", region),
            }),
            DemoRecord::Testing { test_suite, .. } => json!({
                "type": "testing",
                "test_suite": test_suite,
                "cleaned": cleaned,
                "result": format!("Testing results for {}: PASS", test_suite),
            }),
            DemoRecord::Field { location, .. } => json!({
                "type": "field",
                "location": location,
                "cleaned": cleaned,
                "inference": format!("Field inference at {}: No anomaly", location),
            }),
        }
    }
}

/// 逐个处理
pub fn process_all(records: &[DemoRecord]) -> Vec<Value> {
    records.iter().map(DemoRecord::process).collect()
}

/// 字符串取原文，其余 JSON 值取序列化文本；null 视为缺失
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
