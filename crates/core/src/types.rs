use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::DerivedMetrics;

// ─── Raw source rows ────────────────────────────────────────────────────────

/// One marketing row as read from a source, before date parsing and
/// metric derivation. Column aliases cover the platform export headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMarketingRow {
    pub date: String,
    /// Filled in by the loader from the source the row came from.
    #[serde(skip)]
    pub channel: String,
    pub tactic: String,
    #[serde(alias = "state")]
    pub region: String,
    #[serde(alias = "impression")]
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    #[serde(alias = "attributed revenue")]
    pub attributed_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBusinessRow {
    pub date: String,
    #[serde(alias = "# of orders")]
    pub order_count: u64,
    #[serde(alias = "new customers")]
    pub new_customers: u64,
    #[serde(alias = "total revenue")]
    pub total_revenue: f64,
    #[serde(alias = "gross profit")]
    pub gross_profit: f64,
}

/// Unparsed pair of tables, as produced by a `RecordSource`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub marketing: Vec<RawMarketingRow>,
    pub business: Vec<RawBusinessRow>,
}

// ─── Normalized records ─────────────────────────────────────────────────────

/// One (date, channel, tactic, region) observation with its derived
/// efficiency metrics. Derived fields are set once, by `new`; the type is
/// serialize-only so they cannot be read back out of step with the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketingRecord {
    pub date: NaiveDate,
    pub channel: String,
    pub tactic: String,
    pub region: String,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub roas: f64,
    /// Percentage, 0-100 for well-formed rows.
    pub ctr: f64,
    pub cpc: f64,
}

impl MarketingRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        channel: impl Into<String>,
        tactic: impl Into<String>,
        region: impl Into<String>,
        impressions: u64,
        clicks: u64,
        spend: f64,
        attributed_revenue: f64,
    ) -> Self {
        let derived = DerivedMetrics::compute(impressions, clicks, spend, attributed_revenue);
        Self {
            date,
            channel: channel.into(),
            tactic: tactic.into(),
            region: region.into(),
            impressions,
            clicks,
            spend,
            attributed_revenue,
            roas: derived.roas,
            ctr: derived.ctr,
            cpc: derived.cpc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub date: NaiveDate,
    pub order_count: u64,
    pub new_customers: u64,
    pub total_revenue: f64,
    /// May be negative.
    pub gross_profit: f64,
}

/// Marketing and business tables for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub marketing: Vec<MarketingRecord>,
    pub business: Vec<BusinessRecord>,
}

impl Dataset {
    pub fn new(marketing: Vec<MarketingRecord>, business: Vec<BusinessRecord>) -> Self {
        Self {
            marketing,
            business,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.marketing.is_empty() && self.business.is_empty()
    }
}

// ─── Summaries ──────────────────────────────────────────────────────────────

/// Headline KPIs over a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_spend: f64,
    pub total_attributed_revenue: f64,
    /// `total_attributed_revenue / total_spend` (0.0 when spend is zero).
    pub overall_roas: f64,
    /// `total_spend / total_new_customers` (0.0 when there are none).
    pub blended_cac: f64,
}

/// Per-channel totals with ratios recomputed from the sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub channel: String,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub clicks: u64,
    pub impressions: u64,
    pub roas: f64,
    pub ctr: f64,
}
