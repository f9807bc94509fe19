// ==========================================
// 数据平台 - 领域类型定义
// ==========================================
// 记录类型是封闭集合: manufacturing / sales / field / testing
// 每种类型对应一个文档集合和一个上传端点
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 记录类型 (Record Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Manufacturing, // 生产
    Sales,         // 销售
    Field,         // 现场
    Testing,       // 测试
}

impl RecordKind {
    /// 全部记录类型（固定顺序）
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Manufacturing,
        RecordKind::Sales,
        RecordKind::Field,
        RecordKind::Testing,
    ];

    /// 文档集合名称
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Manufacturing => "manufacturing",
            RecordKind::Sales => "sales",
            RecordKind::Field => "field",
            RecordKind::Testing => "testing",
        }
    }

    /// 展示名称（用于上传响应消息）
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Manufacturing => "Manufacturing",
            RecordKind::Sales => "Sales",
            RecordKind::Field => "Field",
            RecordKind::Testing => "Testing",
        }
    }

    /// 上传端点（相对路径）
    pub fn upload_endpoint(&self) -> String {
        format!("upload/{}", self.collection())
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manufacturing" => Ok(RecordKind::Manufacturing),
            "sales" => Ok(RecordKind::Sales),
            "field" => Ok(RecordKind::Field),
            "testing" => Ok(RecordKind::Testing),
            other => Err(format!("未知的记录类型: {}", other)),
        }
    }
}
