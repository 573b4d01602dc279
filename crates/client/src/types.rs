use sentinel_bundle::{CompactSignature, CompressedPublicKey, SignedBundle};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Bundle broadcast with a synchronous acknowledgement.
pub const BROADCAST_BUNDLE_SYNC: &str = "broadcast_bundle_sync";

/// Bundle broadcast with an asynchronous acknowledgement.
pub const BROADCAST_BUNDLE_ASYNC: &str = "broadcast_bundle_async";

/// Single transaction broadcast, outside of any bundle.
pub const BROADCAST_SECURE_TX: &str = "broadcast_secure_tx";

/// Request id. Every request is sent in its own HTTP call.
pub(crate) const REQUEST_ID: u64 = 1;

/// How the sentinel acknowledges a bundle.
///
/// This only selects the JSON-RPC method. It has no effect on how the bundle
/// is signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// `broadcast_bundle_sync`.
    #[default]
    Sync,
    /// `broadcast_bundle_async`.
    Async,
}

impl BroadcastMode {
    /// The JSON-RPC method for this mode.
    pub const fn method(self) -> &'static str {
        match self {
            Self::Sync => BROADCAST_BUNDLE_SYNC,
            Self::Async => BROADCAST_BUNDLE_ASYNC,
        }
    }

    /// True for [`BroadcastMode::Sync`].
    pub const fn is_sync(self) -> bool {
        matches!(self, Self::Sync)
    }
}

impl From<bool> for BroadcastMode {
    fn from(sync: bool) -> Self {
        if sync {
            Self::Sync
        } else {
            Self::Async
        }
    }
}

impl fmt::Display for BroadcastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sync => "sync",
            Self::Async => "async",
        })
    }
}

/// Error parsing a [`BroadcastMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown broadcast mode {0:?}, expected \"sync\" or \"async\"")]
pub struct UnknownBroadcastMode(pub String);

impl FromStr for BroadcastMode {
    type Err = UnknownBroadcastMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sync" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            _ => Err(UnknownBroadcastMode(s.to_owned())),
        }
    }
}

/// A JSON-RPC request as the sentinel expects it: `method`, `params` and
/// `id`, with no `jsonrpc` version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcRequest<P> {
    /// The method name.
    pub method: &'static str,
    /// Positional parameters.
    pub params: P,
    /// Request id.
    pub id: u64,
}

impl<P> RpcRequest<P> {
    /// Create a new request with the default id.
    pub const fn new(method: &'static str, params: P) -> Self {
        Self { method, params, id: REQUEST_ID }
    }
}

/// Positional parameters of a bundle broadcast:
/// `[transactions, desiredHeight, pubKey, signature]`.
///
/// The height is sent as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleParams<'a>(
    pub &'a [String],
    pub String,
    pub &'a CompressedPublicKey,
    pub &'a CompactSignature,
);

impl<'a> BundleParams<'a> {
    /// Build the parameters for a signed bundle.
    pub fn new(bundle: &'a SignedBundle, desired_height: u64) -> Self {
        Self(
            bundle.transactions(),
            desired_height.to_string(),
            bundle.pub_key(),
            bundle.signature(),
        )
    }
}

/// Build the request for a bundle broadcast.
pub fn bundle_request(
    bundle: &SignedBundle,
    desired_height: u64,
    mode: BroadcastMode,
) -> RpcRequest<BundleParams<'_>> {
    RpcRequest::new(mode.method(), BundleParams::new(bundle, desired_height))
}

/// Build the request for a secure transaction broadcast.
pub fn secure_tx_request(tx: &str) -> RpcRequest<[&str; 1]> {
    RpcRequest::new(BROADCAST_SECURE_TX, [tx])
}
