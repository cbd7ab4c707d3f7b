use serde::Deserialize;

use crate::error::IntelResult;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `MARKETING_INTEL__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Where the per-channel marketing tables and the business table live.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_business_file")]
    pub business_file: String,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelSource {
    pub name: String,
    pub file: String,
}

impl ChannelSource {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Shape of the generated stand-in data used when sources are unreadable.
#[derive(Debug, Clone, Deserialize)]
pub struct SyntheticConfig {
    /// First day of the window, `YYYY-MM-DD`.
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Fixed RNG seed; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

// Default functions
fn default_data_dir() -> String {
    ".".to_string()
}
fn default_business_file() -> String {
    "Business.csv".to_string()
}
fn default_channels() -> Vec<ChannelSource> {
    vec![
        ChannelSource::new("Facebook", "Facebook.csv"),
        ChannelSource::new("Google", "Google.csv"),
        ChannelSource::new("TikTok", "TikTok.csv"),
    ]
}
fn default_start_date() -> String {
    "2025-05-16".to_string()
}
fn default_window_days() -> u32 {
    120
}
fn default_ttl_secs() -> u64 {
    60
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            business_file: default_business_file(),
            channels: default_channels(),
        }
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            window_days: default_window_days(),
            seed: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            synthetic: SyntheticConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and an optional config file.
    /// A file that exists but does not parse is an `IntelError::Config`.
    pub fn load(path: Option<&str>) -> IntelResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("MARKETING_INTEL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
