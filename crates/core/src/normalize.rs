//! Date parsing and per-record metric derivation.
//!
//! Derived marketing metrics use replace-then-divide: a zero denominator is
//! swapped for 1 before dividing. A zero numerator therefore yields 0, while
//! a non-zero numerator over a zero denominator yields the numerator itself.
//! KPI and aggregate ratios elsewhere use an explicit zero check instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::error::{IntelError, IntelResult};
use crate::types::{BusinessRecord, Dataset, MarketingRecord, RawBusinessRow, RawDataset};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Divide after replacing a zero denominator with 1.
pub fn replace_zero_divide(numerator: f64, denominator: f64) -> f64 {
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };
    numerator / denominator
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub roas: f64,
    pub ctr: f64,
    pub cpc: f64,
}

impl DerivedMetrics {
    pub fn compute(impressions: u64, clicks: u64, spend: f64, attributed_revenue: f64) -> Self {
        Self {
            roas: replace_zero_divide(attributed_revenue, spend),
            ctr: replace_zero_divide(clicks as f64, impressions as f64) * 100.0,
            cpc: replace_zero_divide(spend, clicks as f64),
        }
    }
}

/// Turns a `RawDataset` into a typed `Dataset`. Any bad row fails the whole
/// table; nothing is repaired per row.
pub struct Normalizer;

impl Normalizer {
    pub fn normalize(raw: RawDataset) -> IntelResult<Dataset> {
        let mut clicks_over_impressions = 0usize;
        let mut marketing = Vec::with_capacity(raw.marketing.len());

        for (idx, row) in raw.marketing.into_iter().enumerate() {
            let date = Self::parse_date(&row.date)?;
            check_amount(row.spend, "spend", idx, &row.channel)?;
            check_amount(row.attributed_revenue, "attributed_revenue", idx, &row.channel)?;
            if row.clicks > row.impressions {
                clicks_over_impressions += 1;
            }
            marketing.push(MarketingRecord::new(
                date,
                row.channel,
                row.tactic,
                row.region,
                row.impressions,
                row.clicks,
                row.spend,
                row.attributed_revenue,
            ));
        }

        if clicks_over_impressions > 0 {
            warn!(
                rows = clicks_over_impressions,
                "Marketing rows report more clicks than impressions"
            );
        }

        let business = raw
            .business
            .into_iter()
            .enumerate()
            .map(|(idx, row)| Self::normalize_business(idx, row))
            .collect::<IntelResult<Vec<_>>>()?;

        debug!(
            marketing_rows = marketing.len(),
            business_rows = business.len(),
            "Dataset normalized"
        );

        Ok(Dataset::new(marketing, business))
    }

    /// Parse a date cell to day granularity. Timestamps are truncated to
    /// the calendar date they carry.
    pub fn parse_date(value: &str) -> IntelResult<NaiveDate> {
        let trimmed = value.trim();

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Ok(date);
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Ok(dt.date());
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.date_naive());
        }

        Err(IntelError::InvalidDate {
            value: value.to_string(),
        })
    }

    fn normalize_business(idx: usize, row: RawBusinessRow) -> IntelResult<BusinessRecord> {
        let date = Self::parse_date(&row.date)?;
        check_amount(row.total_revenue, "total_revenue", idx, "business")?;
        if !row.gross_profit.is_finite() {
            return Err(IntelError::InvalidRecord(format!(
                "business row {idx}: gross_profit is not a finite number"
            )));
        }
        Ok(BusinessRecord {
            date,
            order_count: row.order_count,
            new_customers: row.new_customers,
            total_revenue: row.total_revenue,
            gross_profit: row.gross_profit,
        })
    }
}

fn check_amount(value: f64, field: &str, idx: usize, table: &str) -> IntelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(IntelError::InvalidRecord(format!(
            "{table} row {idx}: {field} must be a non-negative amount, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawMarketingRow;

    fn raw_marketing(
        date: &str,
        impressions: u64,
        clicks: u64,
        spend: f64,
        revenue: f64,
    ) -> RawMarketingRow {
        RawMarketingRow {
            date: date.to_string(),
            channel: "Google".to_string(),
            tactic: "Search".to_string(),
            region: "NY".to_string(),
            impressions,
            clicks,
            spend,
            attributed_revenue: revenue,
        }
    }

    fn raw_business(date: &str) -> RawBusinessRow {
        RawBusinessRow {
            date: date.to_string(),
            order_count: 250,
            new_customers: 60,
            total_revenue: 30_000.0,
            gross_profit: 15_000.0,
        }
    }

    #[test]
    fn test_derived_metrics() {
        let m = DerivedMetrics::compute(1_000, 10, 100.0, 300.0);
        assert!((m.roas - 3.0).abs() < f64::EPSILON);
        assert!((m.ctr - 1.0).abs() < f64::EPSILON);
        assert!((m.cpc - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_denominators_with_zero_numerators() {
        let m = DerivedMetrics::compute(0, 0, 0.0, 0.0);
        assert_eq!(m.roas, 0.0);
        assert_eq!(m.ctr, 0.0);
        assert_eq!(m.cpc, 0.0);
    }

    #[test]
    fn test_zero_denominator_yields_numerator() {
        // Revenue with no spend: divided by the substituted 1.
        let m = DerivedMetrics::compute(0, 5, 0.0, 42.0);
        assert!((m.roas - 42.0).abs() < f64::EPSILON);
        assert!((m.ctr - 500.0).abs() < f64::EPSILON);

        let m = DerivedMetrics::compute(100, 0, 80.0, 0.0);
        assert!((m.cpc - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_derived_fields_never_nan() {
        for (imp, clk, spend, rev) in [(0, 0, 0.0, 0.0), (0, 3, 0.0, 9.0), (10, 0, 5.0, 0.0)] {
            let m = DerivedMetrics::compute(imp, clk, spend, rev);
            assert!(m.roas.is_finite() && m.ctr.is_finite() && m.cpc.is_finite());
        }
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for input in [
            "2025-06-01",
            " 2025-06-01 ",
            "06/01/2025",
            "2025/06/01",
            "2025-06-01 13:45:00",
            "2025-06-01T00:00:00",
            "2025-06-01T08:30:00+02:00",
        ] {
            assert_eq!(Normalizer::parse_date(input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for input in ["", "yesterday", "2025-13-01", "32/01/2025"] {
            assert!(matches!(
                Normalizer::parse_date(input),
                Err(IntelError::InvalidDate { .. })
            ));
        }
    }

    #[test]
    fn test_normalize_dataset() {
        let raw = RawDataset {
            marketing: vec![
                raw_marketing("2025-06-01", 1_000, 10, 100.0, 300.0),
                raw_marketing("2025-06-02", 0, 0, 0.0, 0.0),
            ],
            business: vec![raw_business("2025-06-01")],
        };

        let ds = Normalizer::normalize(raw).unwrap();
        assert_eq!(ds.marketing.len(), 2);
        assert_eq!(ds.business.len(), 1);
        assert_eq!(ds.marketing[0].channel, "Google");
        assert!((ds.marketing[0].roas - 3.0).abs() < f64::EPSILON);
        assert_eq!(ds.marketing[1].roas, 0.0);
        assert_eq!(ds.marketing[1].ctr, 0.0);
        assert_eq!(ds.marketing[1].cpc, 0.0);
        assert_eq!(ds.business[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_malformed_date_fails_whole_load() {
        let raw = RawDataset {
            marketing: vec![
                raw_marketing("2025-06-01", 1_000, 10, 100.0, 300.0),
                raw_marketing("not-a-date", 1_000, 10, 100.0, 300.0),
            ],
            business: vec![raw_business("2025-06-01")],
        };
        assert!(matches!(
            Normalizer::normalize(raw),
            Err(IntelError::InvalidDate { .. })
        ));

        let raw = RawDataset {
            marketing: vec![],
            business: vec![raw_business("06-01")],
        };
        assert!(Normalizer::normalize(raw).is_err());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let raw = RawDataset {
            marketing: vec![raw_marketing("2025-06-01", 1_000, 10, -5.0, 300.0)],
            business: vec![],
        };
        assert!(matches!(
            Normalizer::normalize(raw),
            Err(IntelError::InvalidRecord(_))
        ));

        let raw = RawDataset {
            marketing: vec![raw_marketing("2025-06-01", 1_000, 10, 5.0, f64::NAN)],
            business: vec![],
        };
        assert!(Normalizer::normalize(raw).is_err());
    }

    #[test]
    fn test_negative_gross_profit_allowed() {
        let mut row = raw_business("2025-06-01");
        row.gross_profit = -1_200.0;
        let ds = Normalizer::normalize(RawDataset {
            marketing: vec![],
            business: vec![row],
        })
        .unwrap();
        assert!((ds.business[0].gross_profit + 1_200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clicks_above_impressions_kept() {
        let raw = RawDataset {
            marketing: vec![raw_marketing("2025-06-01", 10, 50, 20.0, 40.0)],
            business: vec![],
        };
        let ds = Normalizer::normalize(raw).unwrap();
        assert_eq!(ds.marketing.len(), 1);
        assert!((ds.marketing[0].ctr - 500.0).abs() < f64::EPSILON);
    }
}
