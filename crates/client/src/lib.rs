//! Sentinel RPC client.
//!
//! Sends [`SignedBundle`]s and single secure transactions to a sentinel
//! relay over JSON-RPC, and wires a [`BundleSigner`] to a submitter through
//! [`BundleSender`].
//!
//! [`SignedBundle`]: sentinel_bundle::SignedBundle
//! [`BundleSigner`]: sentinel_bundle::BundleSigner

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
pub use client::SentinelClient;

/// Environment configuration for the client and bundle signer.
pub mod config;
pub use config::{ConfigError, SentinelConfig};

mod error;
pub use error::{Result, SentinelError};

mod submit;
pub use submit::{BundleSender, BundleSenderError, BundleSubmitter, SentinelSubmitter};

/// JSON-RPC request types for the sentinel.
pub mod types;
pub use types::{BroadcastMode, UnknownBroadcastMode};
