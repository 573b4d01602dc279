use crate::{
    types::{bundle_request, secure_tx_request, RpcRequest},
    BroadcastMode, Result,
};
use sentinel_bundle::SignedBundle;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Client for a sentinel's JSON-RPC endpoint.
///
/// Every call is a single JSON POST to the configured URL. Responses are
/// returned as parsed JSON without interpretation. Timeouts and retries are
/// left to the [`reqwest::Client`] supplied by the caller.
#[derive(Debug, Clone)]
pub struct SentinelClient {
    /// The URL of the sentinel RPC endpoint.
    url: reqwest::Url,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
}

impl SentinelClient {
    /// Create a new client with the given URL and reqwest client.
    pub const fn new_with_client(url: reqwest::Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }

    /// Instantiate a new client with the given URL and a new reqwest client.
    pub fn new(url: reqwest::Url) -> Self {
        Self { url, client: reqwest::Client::new() }
    }

    /// Create a new client given a string URL.
    pub fn new_from_string(url: &str) -> Result<Self> {
        let url = reqwest::Url::parse(url)?;
        Ok(Self::new(url))
    }

    /// Get the URL requests are sent to.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Get the client used to send requests.
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    async fn post_rpc<P: Serialize + Send + Sync>(&self, request: RpcRequest<P>) -> Result<Value> {
        debug!(method = request.method, "Sending request to sentinel");

        self.client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach sentinel"))?
            .error_for_status()
            .inspect_err(|e| warn!(%e, "Sentinel rejected request"))?
            .json::<Value>()
            .await
            .inspect_err(|e| warn!(%e, "Failed to parse response from sentinel"))
            .map_err(Into::into)
    }

    /// Broadcast a signed bundle for inclusion at `desired_height`.
    #[instrument(
        skip_all,
        fields(txs = bundle.transactions().len(), desired_height = desired_height, %mode)
    )]
    pub async fn send_bundle(
        &self,
        bundle: &SignedBundle,
        desired_height: u64,
        mode: BroadcastMode,
    ) -> Result<Value> {
        self.post_rpc(bundle_request(bundle, desired_height, mode)).await
    }

    /// Broadcast a single base64 encoded transaction through the sentinel.
    #[instrument(skip_all)]
    pub async fn send_secure_transaction(&self, tx: &str) -> Result<Value> {
        self.post_rpc(secure_tx_request(tx)).await
    }
}
