// ==========================================
// 数据平台 - HTTP 路由
// ==========================================
// 路由:
//   GET  /                              健康检查
//   POST /upload/{kind}                 上传单条记录
//   GET  /{kind}                        查询集合
//   GET  /analysis/manufacturing        制造分析报告（?start=&end=）
//   GET  /analysis/{kind}               通用摘要
//   POST /oop_demo/demo/process         演示单条
//   POST /oop_demo/demo/process-batch   演示批量
// 阻塞操作（SQLite、读文件）放入 spawn_blocking
// ==========================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{ApiError, ApiResult, DemoBatchResponse, ReportQuery, UploadResponse};
use crate::app::state::AppState;
use crate::demo::{DemoBatchRequest, DemoItem};
use crate::domain::{Document, ManufacturingReport, RecordKind};
use crate::engine::DataSummary;

type AppStateArc = Arc<AppState>;

/// 构建完整路由
pub fn build_router(state: AppStateArc) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(record_routes())
        .merge(analysis_routes())
        .merge(demo_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ==========================================
// Health Routes
// ==========================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(root))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend running..." }))
}

// ==========================================
// Record Routes
// ==========================================

pub fn record_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/upload/:kind", post(upload_record))
        .route("/:kind", get(list_records))
}

async fn upload_record(
    State(state): State<AppStateArc>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<UploadResponse>> {
    let kind = parse_kind(&kind)?;
    let api = state.record_api.clone();
    let resp = run_blocking(move || api.upload(kind, body)).await?;
    Ok(Json(resp))
}

async fn list_records(
    State(state): State<AppStateArc>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Vec<Document>>> {
    let kind = parse_kind(&kind)?;
    let api = state.record_api.clone();
    let docs = run_blocking(move || api.list(kind)).await?;
    Ok(Json(docs))
}

// ==========================================
// Analysis Routes
// ==========================================

pub fn analysis_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/analysis/manufacturing", get(manufacturing_report))
        .route("/analysis/:kind", get(summarize_records))
}

async fn manufacturing_report(
    State(state): State<AppStateArc>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<ManufacturingReport>> {
    let api = state.analytics_api.clone();
    let report = run_blocking(move || api.report_for_query(&query)).await?;
    Ok(Json(report))
}

async fn summarize_records(
    State(state): State<AppStateArc>,
    Path(kind): Path<String>,
) -> ApiResult<Json<DataSummary>> {
    let kind = parse_kind(&kind)?;
    let api = state.record_api.clone();
    let summary = run_blocking(move || api.summarize(kind)).await?;
    Ok(Json(summary))
}

// ==========================================
// Demo Routes
// ==========================================

pub fn demo_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/oop_demo/demo/process", post(demo_process))
        .route("/oop_demo/demo/process-batch", post(demo_process_batch))
}

async fn demo_process(
    State(state): State<AppStateArc>,
    Json(item): Json<DemoItem>,
) -> ApiResult<Json<Value>> {
    Ok(Json(state.demo_api.process(&item)?))
}

async fn demo_process_batch(
    State(state): State<AppStateArc>,
    Json(request): Json<DemoBatchRequest>,
) -> ApiResult<Json<DemoBatchResponse>> {
    Ok(Json(state.demo_api.process_batch(&request)?))
}

// ==========================================
// 辅助函数
// ==========================================

/// 路径中的记录类型；未知类型按 404 处理
fn parse_kind(raw: &str) -> ApiResult<RecordKind> {
    raw.parse::<RecordKind>()
        .map_err(|_| ApiError::NotFound(format!("未知记录类型: {}", raw)))
}

/// 在阻塞线程池中执行同步 API 调用
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("后台任务失败: {}", e)))?
}
