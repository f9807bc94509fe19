// ==========================================
// 数据平台 - 制造分析报告组装
// ==========================================
// 主流程: 时间窗口 → 聚合（KPI / 时间序列 / 机组 / 停机排名）
//        → 趋势结论 → 样本 → 报告
// 样本: 最近 sample_limit 行，再按日期每天最多 sample_per_day 行
// ==========================================

use crate::config::AnalyticsSettings;
use crate::domain::{Dataset, ManufacturingReport, SampleRow};
use crate::engine::aggregation::{defect_rate_pct, AggregationEngine};
use crate::engine::trend::TrendNarrator;
use crate::engine::window::{DateRange, TimeWindowSelector};
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct ReportAssembler {
    settings: AnalyticsSettings,
    aggregation: AggregationEngine,
    narrator: TrendNarrator,
}

impl ReportAssembler {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self {
            settings,
            aggregation: AggregationEngine::new(),
            narrator: TrendNarrator::new(),
        }
    }

    /// 从完整数据集生成报告
    pub fn build(&self, dataset: Dataset, range: &DateRange) -> ManufacturingReport {
        let selector = TimeWindowSelector::new(self.settings.window_days);
        let window = selector.select(dataset, range);
        self.assemble(window)
    }

    /// 从已选窗口生成报告
    pub fn assemble(&self, mut window: Dataset) -> ManufacturingReport {
        window.sort_by_date();
        let records = &window.records;

        // 1. 聚合
        let kpis = self.aggregation.kpis(records);
        let time_series = self.aggregation.time_series(records);
        let by_machine = self.aggregation.by_machine(records);
        let downtime_by_machine = self.aggregation.downtime_ranking(records);

        // 2. 结论
        let conclusions = vec![
            format!(
                "Total production: {}, defects: {} (rate {:.2}%).",
                kpis.total_production,
                kpis.total_defects,
                defect_rate_pct(kpis.total_defects, kpis.total_production)
            ),
            self.narrator.narrate_counts(&time_series.production),
        ];

        // 3. 样本
        let sample = self.sample(&window);

        tracing::info!(
            rows = window.len(),
            days = time_series.dates.len(),
            machines = by_machine.len(),
            "制造分析报告已生成"
        );

        ManufacturingReport {
            kpis,
            time_series,
            by_machine,
            downtime_by_machine,
            conclusions,
            sample,
        }
    }

    /// 样本: 调用方保证 window 已按日期排序
    fn sample(&self, window: &Dataset) -> Vec<SampleRow> {
        let skip = window.len().saturating_sub(self.settings.sample_limit);

        let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
        window
            .records
            .iter()
            .skip(skip)
            .filter(|record| {
                let Some(date) = record.date else {
                    return false;
                };
                let seen = per_day.entry(date).or_insert(0);
                *seen += 1;
                *seen <= self.settings.sample_per_day
            })
            .map(|record| record.to_sample_row())
            .collect()
    }
}
