// ==========================================
// 数据平台 - 制造分析 API
// ==========================================
// 职责: 解析查询参数 → 加载数据源 → 组装报告
// 每次请求重新加载数据源，不做缓存
// ==========================================

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalyticsSettings;
use crate::domain::ManufacturingReport;
use crate::engine::{DateRange, ReportAssembler};
use crate::importer::{parse_flexible_date, ManufacturingLoader};

/// 报告查询参数（?start=YYYY-MM-DD&end=YYYY-MM-DD）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

// ==========================================
// AnalyticsApi - 制造分析 API
// ==========================================
pub struct AnalyticsApi {
    source: PathBuf,
    loader: ManufacturingLoader,
    assembler: ReportAssembler,
}

impl AnalyticsApi {
    pub fn new(source: impl Into<PathBuf>, settings: AnalyticsSettings) -> Self {
        Self {
            source: source.into(),
            loader: ManufacturingLoader::new(),
            assembler: ReportAssembler::new(settings),
        }
    }

    /// 数据源路径
    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    /// 生成制造分析报告
    ///
    /// # 参数
    /// - start / end: 可选日期（空字符串视为未给定）
    ///
    /// # 错误
    /// - InvalidInput: 日期无法解析
    /// - LoadError: 数据源不可读
    pub fn manufacturing_report(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ApiResult<ManufacturingReport> {
        let range = DateRange::new(parse_bound("start", start)?, parse_bound("end", end)?);

        let dataset = self.loader.load(&self.source).map_err(|e| {
            tracing::error!(source = %self.source.display(), error = %e, "制造数据加载失败");
            ApiError::from(e)
        })?;

        tracing::info!(
            rows = dataset.len(),
            start = ?range.start,
            end = ?range.end,
            "生成制造分析报告"
        );

        Ok(self.assembler.build(dataset, &range))
    }

    /// 查询参数入口
    pub fn report_for_query(&self, query: &ReportQuery) -> ApiResult<ManufacturingReport> {
        self.manufacturing_report(query.start.as_deref(), query.end.as_deref())
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    parse_flexible_date(text)
        .map(Some)
        .ok_or_else(|| ApiError::InvalidInput(format!("{} 日期格式无效: {}", name, text)))
}
