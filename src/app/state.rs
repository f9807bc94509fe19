// ==========================================
// 数据平台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 在 axum Router 中以 Arc<AppState> 作为 State 共享
// ==========================================

use std::sync::Arc;

use crate::api::{AnalyticsApi, DemoApi, RecordApi};
use crate::config::AppConfig;
use crate::repository::{DocumentStore, RepositoryResult, SqliteDocumentStore};

/// 应用状态
pub struct AppState {
    /// 启动配置
    pub config: Arc<AppConfig>,

    /// 记录上传/查询API
    pub record_api: Arc<RecordApi>,

    /// 制造分析API
    pub analytics_api: Arc<AnalyticsApi>,

    /// 多态演示API
    pub demo_api: Arc<DemoApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// 打开 config.db_path 指向的 SQLite 文档库（不存在则创建）
    pub fn new(config: AppConfig) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        let store = SqliteDocumentStore::new(&config.db_path)?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// 使用给定的文档库创建（测试注入内存库）
    pub fn with_store(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let record_api = Arc::new(RecordApi::new(store));
        let analytics_api = Arc::new(AnalyticsApi::new(
            config.manufacturing_source.clone(),
            config.analytics,
        ));

        tracing::info!(
            source = %config.manufacturing_source.display(),
            window_days = config.analytics.window_days,
            "AppState初始化完成"
        );

        Self {
            config: Arc::new(config),
            record_api,
            analytics_api,
            demo_api: Arc::new(DemoApi::new()),
        }
    }
}
