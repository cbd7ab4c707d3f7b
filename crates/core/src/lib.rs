pub mod config;
pub mod error;
pub mod normalize;
pub mod types;

pub use config::AppConfig;
pub use error::{IntelError, IntelResult};
pub use normalize::Normalizer;
pub use types::{
    BusinessRecord, ChannelSummary, Dataset, KpiSet, MarketingRecord, RawBusinessRow,
    RawDataset, RawMarketingRow,
};
