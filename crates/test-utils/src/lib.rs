//! Test fixtures for the sentinel bundle crates: deterministic keys, mock
//! account sources and submitters, and an in-process mock sentinel.

#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rust_2018_idioms)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod keys;
pub mod mocks;
pub mod sentinel;

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
