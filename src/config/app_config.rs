// ==========================================
// 数据平台 - 启动配置
// ==========================================
// 职责: 启动时一次性读取环境变量，构造 AppConfig
// 约束: 请求处理器只通过 AppState 拿配置，不再读环境变量
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// 环境变量键
pub mod env_keys {
    /// 监听地址（默认 127.0.0.1:5000）
    pub const BIND_ADDR: &str = "DATA_PLATFORM_BIND_ADDR";
    /// 文档库 SQLite 文件路径
    pub const DB_PATH: &str = "DATA_PLATFORM_DB_PATH";
    /// 制造数据源文件（.csv / .xlsx）
    pub const MANUFACTURING_SOURCE: &str = "DATA_PLATFORM_MANUFACTURING_SOURCE";
    /// 默认时间窗口（最近 N 个不同日期）
    pub const WINDOW_DAYS: &str = "DATA_PLATFORM_WINDOW_DAYS";
    /// 样本最多保留的行数
    pub const SAMPLE_LIMIT: &str = "DATA_PLATFORM_SAMPLE_LIMIT";
    /// 样本中每天最多保留的行数
    pub const SAMPLE_PER_DAY: &str = "DATA_PLATFORM_SAMPLE_PER_DAY";
}

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MANUFACTURING_SOURCE: &str = "synthetic_data/manufacturing.csv";
pub const DEFAULT_WINDOW_DAYS: usize = 10;
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;
pub const DEFAULT_SAMPLE_PER_DAY: usize = 5;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 制造分析参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// 无显式日期范围时保留的最近不同日期数
    pub window_days: usize,
    /// 样本先取最近的行数
    pub sample_limit: usize,
    /// 样本中每个日期最多保留的行数
    pub sample_per_day: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            sample_per_day: DEFAULT_SAMPLE_PER_DAY,
        }
    }
}

/// 应用启动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: String,
    pub manufacturing_source: PathBuf,
    pub analytics: AnalyticsSettings,
}

impl AppConfig {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置（测试中用闭包代替环境变量）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get(env_keys::BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let db_path = get(env_keys::DB_PATH).unwrap_or_else(default_db_path);
        let manufacturing_source = get(env_keys::MANUFACTURING_SOURCE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANUFACTURING_SOURCE));

        let analytics = AnalyticsSettings {
            window_days: parse_count(env_keys::WINDOW_DAYS, get(env_keys::WINDOW_DAYS), DEFAULT_WINDOW_DAYS)?,
            sample_limit: parse_count(env_keys::SAMPLE_LIMIT, get(env_keys::SAMPLE_LIMIT), DEFAULT_SAMPLE_LIMIT)?,
            sample_per_day: parse_count(
                env_keys::SAMPLE_PER_DAY,
                get(env_keys::SAMPLE_PER_DAY),
                DEFAULT_SAMPLE_PER_DAY,
            )?,
        };

        Ok(Self {
            bind_addr,
            db_path,
            manufacturing_source,
            analytics,
        })
    }
}

fn parse_count(key: &str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };

    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            message: "必须大于 0".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            message: e.to_string(),
        }),
    }
}

/// 默认文档库路径
///
/// 优先使用用户数据目录，拿不到时回退到当前目录
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./data_platform.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("data-platform");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("data_platform.db");
        }
    }

    path.to_string_lossy().to_string()
}
