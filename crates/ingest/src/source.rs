use intel_core::{IntelResult, RawDataset};

/// A place raw marketing and business tables can be read from.
pub trait RecordSource: Send + Sync {
    /// Human-readable identifier used in logs and the data-origin report.
    fn name(&self) -> &str;

    /// Read both tables in full. Partial results are never returned.
    fn read(&self) -> IntelResult<RawDataset>;
}
