// ==========================================
// 数据平台 - 配置层
// ==========================================
// 职责: 启动配置（数据库路径、数据源、监听地址、分析参数）
// 来源: 环境变量 DATA_PLATFORM_*
// ==========================================

pub mod app_config;

// 重导出
pub use app_config::{default_db_path, env_keys, AnalyticsSettings, AppConfig, ConfigError};
