use crate::{BroadcastMode, SentinelClient, SentinelError};
use core::future::Future;
use sentinel_bundle::{BundleSigner, SentinelBundle, SignedBundle, SigningError};
use serde_json::Value;
use tracing::instrument;

/// A trait for submitting signed bundles to a backend.
///
/// Implementors are responsible for forwarding bundles to a sentinel or any
/// other relay that accepts [`SignedBundle`]s.
pub trait BundleSubmitter {
    /// The response type returned on successful submission.
    type Response;
    /// The error type returned by submission operations.
    type Error;

    /// Submit a signed bundle to the backend.
    fn submit_bundle(
        &self,
        bundle: SignedBundle,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

/// Submits bundles to a sentinel at a fixed height and broadcast mode.
#[derive(Debug, Clone)]
pub struct SentinelSubmitter {
    client: SentinelClient,
    desired_height: u64,
    mode: BroadcastMode,
}

impl SentinelSubmitter {
    /// Create a new submitter.
    pub const fn new(client: SentinelClient, desired_height: u64, mode: BroadcastMode) -> Self {
        Self { client, desired_height, mode }
    }

    /// Get a reference to the client.
    pub const fn client(&self) -> &SentinelClient {
        &self.client
    }

    /// The height bundles are submitted for.
    pub const fn desired_height(&self) -> u64 {
        self.desired_height
    }

    /// The broadcast mode.
    pub const fn mode(&self) -> BroadcastMode {
        self.mode
    }

    /// Set the height for subsequent submissions.
    pub fn set_desired_height(&mut self, desired_height: u64) {
        self.desired_height = desired_height;
    }
}

impl BundleSubmitter for SentinelSubmitter {
    type Response = Value;
    type Error = SentinelError;

    async fn submit_bundle(&self, bundle: SignedBundle) -> Result<Value, SentinelError> {
        self.client.send_bundle(&bundle, self.desired_height, self.mode).await
    }
}

/// Errors returned by [`BundleSender`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BundleSenderError {
    /// Bundle signing failed.
    #[error("bundle signing error: {0}")]
    Signing(#[from] SigningError),
    /// Bundle submission failed.
    #[error("bundle submission error: {0}")]
    Submission(#[source] Box<dyn core::error::Error + Send + Sync>),
}

/// Signs bundles and hands them to a [`BundleSubmitter`].
#[derive(Debug, Clone)]
pub struct BundleSender<Submit> {
    signer: BundleSigner,
    submitter: Submit,
}

impl<Submit> BundleSender<Submit> {
    /// Create a new bundle sender.
    pub const fn new(signer: BundleSigner, submitter: Submit) -> Self {
        Self { signer, submitter }
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &BundleSigner {
        &self.signer
    }

    /// Get a reference to the submitter.
    pub const fn submitter(&self) -> &Submit {
        &self.submitter
    }

    /// Sign a [`SentinelBundle`].
    pub fn sign_bundle(&self, bundle: &SentinelBundle) -> Result<SignedBundle, BundleSenderError> {
        self.signer.sign_bundle(bundle).map_err(Into::into)
    }
}

impl<Submit> BundleSender<Submit>
where
    Submit: BundleSubmitter + Send + Sync,
    Submit::Error: core::error::Error + Send + Sync + 'static,
{
    /// Submit a signed bundle.
    pub async fn send_bundle(
        &self,
        bundle: SignedBundle,
    ) -> Result<Submit::Response, BundleSenderError> {
        self.submitter
            .submit_bundle(bundle)
            .await
            .map_err(|error| BundleSenderError::Submission(Box::new(error)))
    }

    /// Sign and submit a bundle, returning the signed bundle with the
    /// backend's response.
    #[instrument(skip_all, fields(txs = bundle.len()))]
    pub async fn sign_and_send_bundle(
        &self,
        bundle: &SentinelBundle,
    ) -> Result<(SignedBundle, Submit::Response), BundleSenderError> {
        let signed = self.sign_bundle(bundle)?;
        let response = self.send_bundle(signed.clone()).await?;
        Ok((signed, response))
    }
}
