// ==========================================
// 数据平台 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 集中数据平台（上传、查询、制造分析）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 文档存储
pub mod repository;

// 引擎层 - 窗口/聚合/趋势/报告/摘要
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 启动配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 多态演示
pub mod demo;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域
pub use domain::{Dataset, Document, ManufacturingReport, ProductionRecord, RecordKind};

// 引擎
pub use engine::{
    AggregationEngine, DateRange, ReportAssembler, TimeWindowSelector, TrendNarrator,
};

// API
pub use api::{AnalyticsApi, ApiError, DemoApi, RecordApi};

// 配置
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "数据平台";
