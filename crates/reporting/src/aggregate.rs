//! Grouped summaries for charts and tables: per channel and per day.
//! Groups appear in the order their key is first seen.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;
use intel_core::{ChannelSummary, MarketingRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub spend: f64,
    pub attributed_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpend {
    pub channel: String,
    pub spend: f64,
}

pub struct Aggregator;

impl Aggregator {
    /// Sum per channel, then derive ROAS and CTR from the sums. A zero
    /// denominator gives 0.0.
    pub fn by_channel(marketing: &[MarketingRecord]) -> Vec<ChannelSummary> {
        let mut groups = group_by(
            marketing,
            |r| r.channel.clone(),
            |channel| ChannelSummary {
                channel,
                spend: 0.0,
                attributed_revenue: 0.0,
                clicks: 0,
                impressions: 0,
                roas: 0.0,
                ctr: 0.0,
            },
            |acc: &mut ChannelSummary, r| {
                acc.spend += r.spend;
                acc.attributed_revenue += r.attributed_revenue;
                acc.clicks += r.clicks;
                acc.impressions += r.impressions;
            },
        );

        for summary in &mut groups {
            summary.roas = if summary.spend > 0.0 {
                summary.attributed_revenue / summary.spend
            } else {
                0.0
            };
            summary.ctr = if summary.impressions > 0 {
                summary.clicks as f64 / summary.impressions as f64 * 100.0
            } else {
                0.0
            };
        }
        groups
    }

    pub fn by_day(marketing: &[MarketingRecord]) -> Vec<DailyTotals> {
        group_by(
            marketing,
            |r| r.date,
            |date| DailyTotals {
                date,
                spend: 0.0,
                attributed_revenue: 0.0,
            },
            |acc: &mut DailyTotals, r| {
                acc.spend += r.spend;
                acc.attributed_revenue += r.attributed_revenue;
            },
        )
    }

    pub fn spend_share_by_channel(marketing: &[MarketingRecord]) -> Vec<ChannelSpend> {
        group_by(
            marketing,
            |r| r.channel.clone(),
            |channel| ChannelSpend { channel, spend: 0.0 },
            |acc: &mut ChannelSpend, r| acc.spend += r.spend,
        )
    }
}

/// Fold rows into one accumulator per key, keeping first-seen key order.
fn group_by<K, A>(
    rows: &[MarketingRecord],
    key: impl Fn(&MarketingRecord) -> K,
    init: impl Fn(K) -> A,
    fold: impl Fn(&mut A, &MarketingRecord),
) -> Vec<A>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<A> = Vec::new();

    for row in rows {
        let k = key(row);
        let slot = match index.get(&k) {
            Some(&slot) => slot,
            None => {
                groups.push(init(k.clone()));
                index.insert(k, groups.len() - 1);
                groups.len() - 1
            }
        };
        fold(&mut groups[slot], row);
    }

    groups
}
