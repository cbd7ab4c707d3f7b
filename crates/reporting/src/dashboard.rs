//! Marketing dashboard pipeline: cached load, filtering, KPIs and aggregates
//! bundled into one report for the presentation layer.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use intel_cache::LoadCache;
use intel_core::{AppConfig, ChannelSummary, Dataset, IntelResult, KpiSet};
use intel_ingest::{DataOrigin, LoadedData, SourceLoader};
use serde::Serialize;
use tracing::info;

use crate::aggregate::{Aggregator, ChannelSpend, DailyTotals};
use crate::filter::{DateSelection, Filter};
use crate::kpi::KpiCalculator;
use crate::options::{FilterOptions, FilterQuery};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub origin: DataOrigin,
    /// Set when synthetic data stands in for the real sources.
    pub warning: Option<String>,
    pub options: FilterOptions,
    pub applied_dates: DateSelection,
    pub kpis: KpiSet,
    pub by_channel: Vec<ChannelSummary>,
    pub by_day: Vec<DailyTotals>,
    pub spend_share: Vec<ChannelSpend>,
    /// The filtered tables the summaries were computed from.
    pub filtered: Dataset,
    pub generated_at: DateTime<Utc>,
}

pub struct DashboardPipeline {
    loader: SourceLoader,
    cache: LoadCache<LoadedData>,
}

impl DashboardPipeline {
    pub fn new(loader: SourceLoader, cache: LoadCache<LoadedData>) -> Self {
        Self { loader, cache }
    }

    pub fn from_config(config: &AppConfig) -> IntelResult<Self> {
        let loader = SourceLoader::from_config(config)?;
        let cache = LoadCache::new(Duration::from_secs(config.cache.ttl_secs));
        Ok(Self::new(loader, cache))
    }

    /// Loaded dataset, reused while the cache entry is fresh.
    pub fn load(&self) -> IntelResult<Arc<LoadedData>> {
        self.cache.get_or_load(|| self.loader.load())
    }

    pub fn run(&self, query: &FilterQuery) -> IntelResult<DashboardReport> {
        let loaded = self.load()?;
        let options = FilterOptions::from_dataset(&loaded.dataset);
        let resolved = query.resolve(&options);

        let filtered = Filter::apply(
            &loaded.dataset,
            &resolved.dates,
            &resolved.channels,
            &resolved.regions,
        );

        let kpis = KpiCalculator::compute(&filtered.marketing, &filtered.business);
        let by_channel = Aggregator::by_channel(&filtered.marketing);
        let by_day = Aggregator::by_day(&filtered.marketing);
        let spend_share = Aggregator::spend_share_by_channel(&filtered.marketing);

        info!(
            marketing_rows = filtered.marketing.len(),
            business_rows = filtered.business.len(),
            total_spend = kpis.total_spend,
            overall_roas = kpis.overall_roas,
            "Dashboard report computed"
        );

        Ok(DashboardReport {
            origin: loaded.origin.clone(),
            warning: loaded.warning(),
            options,
            applied_dates: resolved.dates,
            kpis,
            by_channel,
            by_day,
            spend_share,
            filtered,
            generated_at: Utc::now(),
        })
    }
}
