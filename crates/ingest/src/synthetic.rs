//! Seedable stand-in data covering a contiguous window of days for every
//! channel, with value ranges chosen to look like real ad-platform exports.

use chrono::{Duration, NaiveDate};
use intel_core::config::SyntheticConfig;
use intel_core::{IntelError, IntelResult, Normalizer, RawBusinessRow, RawDataset, RawMarketingRow};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::source::RecordSource;

const TACTICS: &[&str] = &["ASC", "Retargeting", "Search"];
const REGIONS: &[&str] = &["NY", "CA", "TX", "FL"];

// Half-open ranges, as drawn by `gen_range`.
const IMPRESSIONS: std::ops::Range<u64> = 50_000..200_000;
const CLICKS: std::ops::Range<u64> = 1_000..5_000;
const SPEND: std::ops::Range<f64> = 500.0..3_000.0;
/// Revenue multiplier on spend, which bounds synthetic ROAS.
const ROAS_MULTIPLIER: std::ops::Range<f64> = 1.5..4.0;
const DAILY_REVENUE: std::ops::Range<f64> = 20_000.0..40_000.0;
const DAILY_ORDERS: std::ops::Range<u64> = 200..400;
const DAILY_NEW_CUSTOMERS: std::ops::Range<u64> = 40..120;
const GROSS_MARGIN: std::ops::Range<f64> = 0.4..0.6;

pub struct SyntheticSource {
    name: String,
    start: NaiveDate,
    window_days: u32,
    channels: Vec<String>,
    seed: Option<u64>,
}

impl SyntheticSource {
    pub fn new(start: NaiveDate, window_days: u32, channels: Vec<String>) -> Self {
        Self {
            name: "synthetic".to_string(),
            start,
            window_days,
            channels,
            seed: None,
        }
    }

    /// Fix the RNG seed so every `read` returns the same tables.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fails when the configured start date cannot be parsed, or when the
    /// window or channel list would produce empty tables.
    pub fn from_config(config: &SyntheticConfig, channels: Vec<String>) -> IntelResult<Self> {
        if config.window_days == 0 {
            return Err(IntelError::Config(
                "synthetic.window_days must be at least 1".to_string(),
            ));
        }
        if channels.is_empty() {
            return Err(IntelError::Config(
                "synthetic data needs at least one channel".to_string(),
            ));
        }
        let start = Normalizer::parse_date(&config.start_date)?;
        let source = Self::new(start, config.window_days, channels);
        Ok(match config.seed {
            Some(seed) => source.with_seed(seed),
            None => source,
        })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.window_days).map(move |offset| self.start + Duration::days(i64::from(offset)))
    }

    /// Build the raw tables. Dates are emitted as `YYYY-MM-DD` text so the
    /// result goes through the same normalization as file data.
    pub fn generate(&self) -> RawDataset {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut marketing = Vec::with_capacity(self.window_days as usize * self.channels.len());
        for day in self.days() {
            let date = day.format("%Y-%m-%d").to_string();
            for channel in &self.channels {
                let impressions = rng.gen_range(IMPRESSIONS);
                let clicks = rng.gen_range(CLICKS);
                let spend = rng.gen_range(SPEND);
                let tactic = TACTICS[rng.gen_range(0..TACTICS.len())];
                let region = REGIONS[rng.gen_range(0..REGIONS.len())];
                marketing.push(RawMarketingRow {
                    date: date.clone(),
                    channel: channel.clone(),
                    tactic: tactic.to_string(),
                    region: region.to_string(),
                    impressions,
                    clicks,
                    spend,
                    attributed_revenue: spend * rng.gen_range(ROAS_MULTIPLIER),
                });
            }
        }

        let business = self
            .days()
            .map(|day| {
                let revenue = rng.gen_range(DAILY_REVENUE);
                RawBusinessRow {
                    date: day.format("%Y-%m-%d").to_string(),
                    order_count: rng.gen_range(DAILY_ORDERS),
                    new_customers: rng.gen_range(DAILY_NEW_CUSTOMERS),
                    total_revenue: revenue,
                    gross_profit: revenue * rng.gen_range(GROSS_MARGIN),
                }
            })
            .collect();

        RawDataset {
            marketing,
            business,
        }
    }
}

impl RecordSource for SyntheticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> IntelResult<RawDataset> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn channels() -> Vec<String> {
        vec!["Facebook".into(), "Google".into(), "TikTok".into()]
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[test]
    fn test_shape_covers_window_for_every_channel() {
        let raw = SyntheticSource::new(start(), 120, channels()).generate();
        assert_eq!(raw.marketing.len(), 360);
        assert_eq!(raw.business.len(), 120);

        assert_eq!(raw.marketing[0].date, "2025-05-16");
        assert_eq!(raw.marketing[0].channel, "Facebook");
        assert_eq!(raw.marketing[2].channel, "TikTok");
        assert_eq!(raw.marketing[359].date, "2025-09-12");
        assert_eq!(raw.business[119].date, "2025-09-12");
    }

    #[test]
    fn test_values_stay_in_range() {
        let raw = SyntheticSource::new(start(), 60, channels())
            .with_seed(11)
            .generate();

        for row in &raw.marketing {
            assert!(IMPRESSIONS.contains(&row.impressions));
            assert!(CLICKS.contains(&row.clicks));
            assert!(SPEND.contains(&row.spend));
            let roas = row.attributed_revenue / row.spend;
            assert!((1.5..=4.0).contains(&roas), "roas {roas}");
            assert!(TACTICS.contains(&row.tactic.as_str()));
            assert!(REGIONS.contains(&row.region.as_str()));
        }
        for row in &raw.business {
            assert!(DAILY_ORDERS.contains(&row.order_count));
            assert!(DAILY_NEW_CUSTOMERS.contains(&row.new_customers));
            let margin = row.gross_profit / row.total_revenue;
            assert!((0.4..=0.6).contains(&margin), "margin {margin}");
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = SyntheticSource::new(start(), 30, channels()).with_seed(42).generate();
        let b = SyntheticSource::new(start(), 30, channels()).with_seed(42).generate();
        assert_eq!(a, b);

        let c = SyntheticSource::new(start(), 30, channels()).with_seed(43).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_unseeded_runs_share_shape() {
        let source = SyntheticSource::new(start(), 45, channels());
        let a = Normalizer::normalize(source.generate()).unwrap();
        let b = Normalizer::normalize(source.generate()).unwrap();

        assert_eq!(a.marketing.len(), b.marketing.len());
        assert_eq!(a.business.len(), b.business.len());
        for (x, y) in a.marketing.iter().zip(&b.marketing) {
            assert_eq!(x.date, y.date);
            assert_eq!(x.channel, y.channel);
            assert!(x.roas.is_finite() && y.roas.is_finite());
            assert!(x.ctr.is_finite() && y.ctr.is_finite());
            assert!(x.cpc.is_finite() && y.cpc.is_finite());
        }
    }

    #[test]
    fn test_from_config_rejects_bad_start_date() {
        let config = SyntheticConfig {
            start_date: "sometime".to_string(),
            window_days: 10,
            seed: None,
        };
        assert!(SyntheticSource::from_config(&config, channels()).is_err());

        let config = SyntheticConfig {
            start_date: "2025-06-01".to_string(),
            window_days: 10,
            seed: Some(5),
        };
        let source = SyntheticSource::from_config(&config, channels()).unwrap();
        assert_eq!(source.generate().business.len(), 10);
    }

    #[test]
    fn test_from_config_rejects_empty_window_or_channels() {
        let config = SyntheticConfig {
            start_date: "2025-06-01".to_string(),
            window_days: 0,
            seed: Some(5),
        };
        assert!(matches!(
            SyntheticSource::from_config(&config, channels()),
            Err(IntelError::Config(_))
        ));

        let config = SyntheticConfig {
            window_days: 10,
            ..config
        };
        assert!(matches!(
            SyntheticSource::from_config(&config, Vec::new()),
            Err(IntelError::Config(_))
        ));
    }
}
