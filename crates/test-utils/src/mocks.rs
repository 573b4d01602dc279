//! Mock implementations of the signing and submission traits.
use sentinel_bundle::{Account, AccountSource, SignedBundle};
use sentinel_client::BundleSubmitter;
use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

/// Error returned by [`FailingAccountSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("account source unavailable")]
pub struct SourceUnavailable;

/// An [`AccountSource`] that always fails to list its accounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAccountSource;

impl AccountSource for FailingAccountSource {
    type Error = SourceUnavailable;

    async fn accounts(&self) -> Result<Vec<Account>, Self::Error> {
        Err(SourceUnavailable)
    }
}

/// A mock [`BundleSubmitter`] that captures submitted bundles.
#[derive(Debug, Clone, Default)]
pub struct MockBundleSubmitter {
    bundles: Arc<Mutex<Vec<SignedBundle>>>,
}

impl MockBundleSubmitter {
    /// Create a new mock bundle submitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all submitted bundles.
    pub fn submitted_bundles(&self) -> Vec<SignedBundle> {
        self.bundles.lock().unwrap().clone()
    }
}

impl BundleSubmitter for MockBundleSubmitter {
    type Response = ();
    type Error = Infallible;

    async fn submit_bundle(&self, bundle: SignedBundle) -> Result<(), Self::Error> {
        self.bundles.lock().unwrap().push(bundle);
        Ok(())
    }
}
