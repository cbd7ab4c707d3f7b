//! Headline KPIs: spend, attributed revenue, ROAS and blended CAC.

use intel_core::{BusinessRecord, KpiSet, MarketingRecord};

pub struct KpiCalculator;

impl KpiCalculator {
    /// Ratios use an explicit zero check (0.0 when the denominator is not
    /// positive). An empty marketing table yields `KpiSet::default()`.
    pub fn compute(marketing: &[MarketingRecord], business: &[BusinessRecord]) -> KpiSet {
        if marketing.is_empty() {
            return KpiSet::default();
        }

        let total_spend: f64 = marketing.iter().map(|r| r.spend).sum();
        let total_attributed_revenue: f64 = marketing.iter().map(|r| r.attributed_revenue).sum();
        let total_new_customers: u64 = business.iter().map(|r| r.new_customers).sum();

        KpiSet {
            total_spend,
            total_attributed_revenue,
            overall_roas: if total_spend > 0.0 {
                total_attributed_revenue / total_spend
            } else {
                0.0
            },
            blended_cac: if total_new_customers > 0 {
                total_spend / total_new_customers as f64
            } else {
                0.0
            },
        }
    }
}
