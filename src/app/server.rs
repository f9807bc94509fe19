// ==========================================
// 数据平台 - HTTP 服务
// ==========================================

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::app::routes::build_router;
use crate::app::state::AppState;

/// 启动 HTTP 服务，阻塞直到服务退出
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听地址 {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
