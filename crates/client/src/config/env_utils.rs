use crate::{BroadcastMode, ConfigError};
use sentinel_bundle::BundleSigner;
use std::env;

/// Load a variable from the environment
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::missing(key))
}

/// Load a variable from the environment
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load a variable from the environment
pub fn load_u64(key: &str) -> Result<u64, ConfigError> {
    let val = load_string(key)?;
    val.trim().parse::<u64>().map_err(Into::into)
}

/// Load a variable from the environment, falling back to `default` if unset.
pub fn load_u64_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    match load_string_opt(key) {
        Some(val) => val.trim().parse::<u64>().map_err(Into::into),
        None => Ok(default),
    }
}

/// Load a variable from the environment
pub fn load_url(key: &str) -> Result<reqwest::Url, ConfigError> {
    load_string(key)?.parse().map_err(Into::into)
}

/// Load a variable from the environment, defaulting to
/// [`BroadcastMode::Sync`] if unset.
pub fn load_mode(key: &str) -> Result<BroadcastMode, ConfigError> {
    match load_string_opt(key) {
        Some(val) => val.parse().map_err(Into::into),
        None => Ok(BroadcastMode::default()),
    }
}

/// Load a hex encoded private key from the environment. A `0x` prefix is
/// accepted.
pub fn load_signer(key: &str) -> Result<BundleSigner, ConfigError> {
    let val = load_string(key)?;
    let bytes = hex::decode(val.trim())?;
    BundleSigner::from_private_key(&bytes).map_err(Into::into)
}
