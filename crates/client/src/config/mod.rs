mod env_utils;
pub use env_utils::{
    load_mode, load_signer, load_string, load_string_opt, load_u64, load_u64_or, load_url,
};

mod error;
pub use error::ConfigError;

use crate::{BroadcastMode, SentinelClient, SentinelSubmitter};

/// Env var holding the sentinel RPC endpoint.
pub const SENTINEL_RPC_URL: &str = "SENTINEL_RPC_URL";

/// Env var selecting `sync` or `async` bundle broadcast. Defaults to `sync`.
pub const SENTINEL_BROADCAST_MODE: &str = "SENTINEL_BROADCAST_MODE";

/// Env var holding the desired inclusion height. Defaults to 0.
pub const SENTINEL_DESIRED_HEIGHT: &str = "SENTINEL_DESIRED_HEIGHT";

/// Env var holding the hex encoded bundle signing key.
pub const BUNDLE_SIGNER_KEY: &str = "BUNDLE_SIGNER_KEY";

/// Sentinel connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelConfig {
    /// The sentinel RPC endpoint.
    pub url: reqwest::Url,
    /// Bundle broadcast mode.
    pub mode: BroadcastMode,
    /// Height bundles are submitted for.
    pub desired_height: u64,
}

impl SentinelConfig {
    /// Create a new config.
    pub const fn new(url: reqwest::Url, mode: BroadcastMode, desired_height: u64) -> Self {
        Self { url, mode, desired_height }
    }

    /// Load the config from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: load_url(SENTINEL_RPC_URL)?,
            mode: load_mode(SENTINEL_BROADCAST_MODE)?,
            desired_height: load_u64_or(SENTINEL_DESIRED_HEIGHT, 0)?,
        })
    }

    /// Build a client for the configured endpoint.
    pub fn client(&self) -> SentinelClient {
        SentinelClient::new(self.url.clone())
    }

    /// Build a submitter for the configured endpoint, height and mode.
    pub fn submitter(&self) -> SentinelSubmitter {
        SentinelSubmitter::new(self.client(), self.desired_height, self.mode)
    }
}
