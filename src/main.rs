// ==========================================
// 数据平台 - 服务主入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// 配置: 环境变量 DATA_PLATFORM_*（见 config::env_keys）
// ==========================================

use anyhow::Context;
use data_platform::app::{self, AppState};
use data_platform::config::AppConfig;
use data_platform::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 后端服务", data_platform::APP_NAME);
    tracing::info!("系统版本: {}", data_platform::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env().context("读取配置失败")?;
    tracing::info!("使用数据库: {}", config.db_path);
    tracing::info!("制造数据源: {}", config.manufacturing_source.display());

    let state = AppState::new(config).context("无法初始化AppState")?;

    app::run(state).await
}
