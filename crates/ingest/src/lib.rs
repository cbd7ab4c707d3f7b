//! Source loading — per-channel CSV tables with a synthetic fallback so the
//! pipeline always receives a complete dataset.

#![warn(clippy::unwrap_used)]

pub mod csv_source;
pub mod loader;
pub mod source;
pub mod synthetic;

pub use csv_source::CsvDirectorySource;
pub use loader::{DataOrigin, LoadedData, SourceLoader};
pub use source::RecordSource;
pub use synthetic::SyntheticSource;
