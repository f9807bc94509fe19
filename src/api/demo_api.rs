// ==========================================
// 数据平台 - 多态演示 API
// ==========================================
// 单条: 构造 → 处理
// 批量: 先全部构造（任一未知类型立即失败），再逐个处理
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::demo::{process_all, DemoBatchRequest, DemoItem, DemoRecord};

/// 批量处理响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoBatchResponse {
    pub results: Vec<Value>,
}

pub struct DemoApi;

impl Default for DemoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoApi {
    pub fn new() -> Self {
        Self
    }

    /// 处理单条
    pub fn process(&self, item: &DemoItem) -> ApiResult<Value> {
        let record = DemoRecord::from_item(item)?;
        Ok(record.process())
    }

    /// 批量处理
    pub fn process_batch(&self, request: &DemoBatchRequest) -> ApiResult<DemoBatchResponse> {
        let records = request
            .items
            .iter()
            .map(DemoRecord::from_item)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(items = records.len(), "演示批量处理");
        Ok(DemoBatchResponse {
            results: process_all(&records),
        })
    }
}
