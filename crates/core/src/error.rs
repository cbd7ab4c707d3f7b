use thiserror::Error;

pub type IntelResult<T> = Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Source unavailable ({source_name}): {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("Invalid date: {value:?}")]
    InvalidDate { value: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for IntelError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
