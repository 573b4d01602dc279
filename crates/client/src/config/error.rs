use crate::UnknownBroadcastMode;
use sentinel_bundle::SigningError;

/// Error loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Error parsing a URL from environment variable
    #[error("failed to parse URL: {0}")]
    Url(#[from] url::ParseError),
    /// Error parsing the broadcast mode
    #[error(transparent)]
    Mode(#[from] UnknownBroadcastMode),
    /// The signing key was rejected.
    #[error("invalid signing key: {0}")]
    Key(#[from] SigningError),
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
