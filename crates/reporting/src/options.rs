//! Choices offered to the filter controls, and the query they resolve to.

use std::collections::HashSet;

use chrono::NaiveDate;
use intel_core::Dataset;
use serde::{Deserialize, Serialize};

use crate::filter::DateSelection;

/// Distinct channels and regions (first-seen order) and the marketing date span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub channels: Vec<String>,
    pub regions: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut options = Self::default();
        let mut seen_channels = HashSet::new();
        let mut seen_regions = HashSet::new();

        for record in &dataset.marketing {
            if seen_channels.insert(record.channel.as_str()) {
                options.channels.push(record.channel.clone());
            }
            if seen_regions.insert(record.region.as_str()) {
                options.regions.push(record.region.clone());
            }
            options.first_date = Some(
                options
                    .first_date
                    .map_or(record.date, |d| d.min(record.date)),
            );
            options.last_date = Some(
                options
                    .last_date
                    .map_or(record.date, |d| d.max(record.date)),
            );
        }

        options
    }

    /// The full marketing span, or `Incomplete` when there is no data.
    pub fn default_dates(&self) -> DateSelection {
        match (self.first_date, self.last_date) {
            (Some(start), Some(end)) => DateSelection::range(start, end),
            _ => DateSelection::Incomplete,
        }
    }
}

/// User selections. `None` means "everything offered".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub dates: Option<DateSelection>,
    pub channels: Option<HashSet<String>>,
    pub regions: Option<HashSet<String>>,
}

impl FilterQuery {
    pub fn with_dates(mut self, dates: DateSelection) -> Self {
        self.dates = Some(dates);
        self
    }

    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = Some(channels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = Some(regions.into_iter().map(Into::into).collect());
        self
    }

    /// Fill unset selections from the offered options.
    pub fn resolve(&self, options: &FilterOptions) -> ResolvedQuery {
        ResolvedQuery {
            dates: self.dates.unwrap_or_else(|| options.default_dates()),
            channels: self
                .channels
                .clone()
                .unwrap_or_else(|| options.channels.iter().cloned().collect()),
            regions: self
                .regions
                .clone()
                .unwrap_or_else(|| options.regions.iter().cloned().collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub dates: DateSelection,
    pub channels: HashSet<String>,
    pub regions: HashSet<String>,
}
