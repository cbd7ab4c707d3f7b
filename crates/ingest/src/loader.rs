//! SourceLoader — reads the configured source and, on any failure, swaps
//! in a complete synthetic dataset instead of returning partial data.

use intel_core::{AppConfig, Dataset, IntelResult, Normalizer};
use serde::Serialize;
use tracing::{info, warn};

use crate::csv_source::CsvDirectorySource;
use crate::source::RecordSource;
use crate::synthetic::SyntheticSource;

/// Where a loaded dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    Source { name: String },
    Synthetic { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

impl LoadedData {
    /// User-facing notice when stand-in data is being shown.
    pub fn warning(&self) -> Option<String> {
        match &self.origin {
            DataOrigin::Source { .. } => None,
            DataOrigin::Synthetic { reason } => Some(format!(
                "Source data could not be loaded ({reason}). Using sample data."
            )),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.origin, DataOrigin::Synthetic { .. })
    }
}

pub struct SourceLoader {
    primary: Box<dyn RecordSource>,
    fallback: SyntheticSource,
}

impl SourceLoader {
    pub fn new(primary: Box<dyn RecordSource>, fallback: SyntheticSource) -> Self {
        Self { primary, fallback }
    }

    /// CSV directory source with a synthetic fallback over the same channels.
    pub fn from_config(config: &AppConfig) -> IntelResult<Self> {
        let primary = CsvDirectorySource::from_config(&config.sources);
        let fallback = SyntheticSource::from_config(&config.synthetic, primary.channel_names())?;
        Ok(Self::new(Box::new(primary), fallback))
    }

    /// Load and normalize. Source failures never surface as errors; only a
    /// synthetic dataset that itself fails normalization does.
    pub fn load(&self) -> IntelResult<LoadedData> {
        let attempt = self.primary.read().and_then(Normalizer::normalize);

        match attempt {
            Ok(dataset) => {
                metrics::counter!("ingest.rows_loaded")
                    .increment((dataset.marketing.len() + dataset.business.len()) as u64);
                info!(
                    source = self.primary.name(),
                    marketing_rows = dataset.marketing.len(),
                    business_rows = dataset.business.len(),
                    "Source data loaded"
                );
                Ok(LoadedData {
                    dataset,
                    origin: DataOrigin::Source {
                        name: self.primary.name().to_string(),
                    },
                })
            }
            Err(e) => {
                metrics::counter!("ingest.synthetic_fallback").increment(1);
                warn!(
                    source = self.primary.name(),
                    error = %e,
                    "Source data unavailable, falling back to synthetic data"
                );
                let dataset = Normalizer::normalize(self.fallback.read()?)?;
                Ok(LoadedData {
                    dataset,
                    origin: DataOrigin::Synthetic {
                        reason: e.to_string(),
                    },
                })
            }
        }
    }
}
