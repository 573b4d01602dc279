//! Sentinel Bundle Library
//!
//! Contains the [`SentinelBundle`] type, its canonical [`encode`]ing, and the
//! [`BundleSigner`] that produces the [`SignedBundle`] payload accepted by a
//! sentinel relay.
//!
//! A bundle signature is a compact, low-s secp256k1 ECDSA signature over the
//! SHA-256 digest of the canonical encoding of the bundle's transactions.
//! It is sent together with the signer's compressed public key.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod bundle;
pub use bundle::{bundle_digest, SentinelBundle};

pub mod encode;

mod error;
pub use error::EncodingError;

mod signed;
pub use signed::{
    BundleSignature, CompactSignature, CompressedPublicKey, SignedBundle, COMPACT_SIGNATURE_LEN,
    COMPRESSED_PUBLIC_KEY_LEN,
};

mod signer;
pub use signer::{
    sign_bundle_with_account, sign_bundle_with_key, Account, AccountSource, BundleSigner,
    InvalidKeyError, SigningError, VerifyError, PRIVATE_KEY_LEN,
};
