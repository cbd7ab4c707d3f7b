//! Reads one marketing CSV per channel plus the business CSV from a directory.

use std::path::PathBuf;

use csv::{ReaderBuilder, Trim};
use intel_core::config::{ChannelSource, SourcesConfig};
use intel_core::{IntelError, IntelResult, RawBusinessRow, RawDataset, RawMarketingRow};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::source::RecordSource;

pub struct CsvDirectorySource {
    name: String,
    dir: PathBuf,
    channels: Vec<ChannelSource>,
    business_file: String,
}

impl CsvDirectorySource {
    pub fn new(
        dir: impl Into<PathBuf>,
        channels: Vec<ChannelSource>,
        business_file: impl Into<String>,
    ) -> Self {
        let dir = dir.into();
        Self {
            name: format!("csv:{}", dir.display()),
            dir,
            channels,
            business_file: business_file.into(),
        }
    }

    pub fn from_config(config: &SourcesConfig) -> Self {
        Self::new(
            &config.data_dir,
            config.channels.clone(),
            config.business_file.clone(),
        )
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    fn read_table<T: DeserializeOwned>(&self, file: &str) -> IntelResult<Vec<T>> {
        let path = self.dir.join(file);
        let unavailable = |reason: String| IntelError::SourceUnavailable {
            source_name: path.display().to_string(),
            reason,
        };

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&path)
            .map_err(|e| unavailable(e.to_string()))?;

        let rows = rdr
            .deserialize()
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| unavailable(e.to_string()))?;

        debug!(path = %path.display(), rows = rows.len(), "CSV table read");
        Ok(rows)
    }
}

impl RecordSource for CsvDirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> IntelResult<RawDataset> {
        let mut marketing = Vec::new();
        for channel in &self.channels {
            let rows: Vec<RawMarketingRow> = self.read_table(&channel.file)?;
            marketing.extend(rows.into_iter().map(|mut row| {
                row.channel = channel.name.clone();
                row
            }));
        }

        let business: Vec<RawBusinessRow> = self.read_table(&self.business_file)?;

        Ok(RawDataset {
            marketing,
            business,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;
    use std::path::Path;

    const BUSINESS: &str = "\
date,# of orders,new customers,total revenue,gross profit
2025-06-01,250,60,30000.5,14000
2025-06-02,300,80,35000,-200
";

    fn channels() -> Vec<ChannelSource> {
        vec![
            ChannelSource::new("Facebook", "Facebook.csv"),
            ChannelSource::new("Google", "Google.csv"),
        ]
    }

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("Facebook.csv"),
            "date,tactic,state,impression,clicks,spend,attributed revenue\n\
             2025-06-01,ASC,NY,1000,10,100.0,300.0\n\
             2025-06-02,Retargeting,CA,0,0,0,0\n",
        )
        .unwrap();
        fs::write(
            dir.join("Google.csv"),
            "date,tactic,region,impressions,clicks,spend,attributed_revenue\n\
             2025-06-01, Search , TX ,5000,250,400.25,900\n",
        )
        .unwrap();
        fs::write(dir.join("Business.csv"), BUSINESS).unwrap();
    }

    #[test]
    fn test_reads_and_tags_channels() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());

        let source = CsvDirectorySource::new(tmp.path(), channels(), "Business.csv");
        let raw = source.read().unwrap();

        assert_eq!(raw.marketing.len(), 3);
        assert_eq!(raw.marketing[0].channel, "Facebook");
        assert_eq!(raw.marketing[0].region, "NY");
        assert_eq!(raw.marketing[0].impressions, 1000);
        assert_eq!(raw.marketing[2].channel, "Google");
        assert_eq!(raw.marketing[2].tactic, "Search");
        assert_eq!(raw.marketing[2].region, "TX");
        assert!((raw.marketing[2].spend - 400.25).abs() < f64::EPSILON);

        assert_eq!(raw.business.len(), 2);
        assert_eq!(raw.business[0].order_count, 250);
        assert_eq!(raw.business[1].new_customers, 80);
        assert!((raw.business[1].gross_profit + 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());
        fs::remove_file(tmp.path().join("Google.csv")).unwrap();

        let source = CsvDirectorySource::new(tmp.path(), channels(), "Business.csv");
        match source.read() {
            Err(IntelError::SourceUnavailable { source_name, .. }) => {
                assert!(source_name.ends_with("Google.csv"));
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_row_is_source_unavailable() {
        let tmp = tempfile::tempdir().unwrap();
        write_fixture(tmp.path());
        fs::write(
            tmp.path().join("Business.csv"),
            "date,# of orders,new customers,total revenue,gross profit\n\
             2025-06-01,-3,60,30000,14000\n",
        )
        .unwrap();

        let source = CsvDirectorySource::new(tmp.path(), channels(), "Business.csv");
        assert!(matches!(
            source.read(),
            Err(IntelError::SourceUnavailable { .. })
        ));
    }
}
