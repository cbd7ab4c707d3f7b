//! Date / channel / region filtering applied consistently to both tables.

use std::collections::HashSet;

use chrono::NaiveDate;
use intel_core::Dataset;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The date control's value. Only a complete pair filters anything; a
/// single date (a range still being picked) passes data through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateSelection {
    /// Inclusive on both ends.
    Range { start: NaiveDate, end: NaiveDate },
    Incomplete,
}

impl DateSelection {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Range { start, end }
    }

    /// Interpret the dates a picker returned.
    pub fn from_picked(dates: &[NaiveDate]) -> Self {
        match dates {
            [start, end] => Self::Range {
                start: *start,
                end: *end,
            },
            _ => Self::Incomplete,
        }
    }
}

pub struct Filter;

impl Filter {
    /// Keep marketing rows inside the date range whose channel and region
    /// are selected, and business rows inside the same date range. An
    /// incomplete date selection returns the dataset unfiltered.
    pub fn apply(
        dataset: &Dataset,
        dates: &DateSelection,
        channels: &HashSet<String>,
        regions: &HashSet<String>,
    ) -> Dataset {
        let (start, end) = match *dates {
            DateSelection::Range { start, end } => (start, end),
            DateSelection::Incomplete => {
                warn!("Incomplete date range, skipping filters");
                return dataset.clone();
            }
        };
        let in_range = |date: NaiveDate| date >= start && date <= end;

        let marketing: Vec<_> = dataset
            .marketing
            .iter()
            .filter(|r| {
                in_range(r.date) && channels.contains(&r.channel) && regions.contains(&r.region)
            })
            .cloned()
            .collect();

        let business: Vec<_> = dataset
            .business
            .iter()
            .filter(|r| in_range(r.date))
            .cloned()
            .collect();

        debug!(
            %start,
            %end,
            marketing_rows = marketing.len(),
            business_rows = business.len(),
            "Filters applied"
        );

        Dataset::new(marketing, business)
    }
}
