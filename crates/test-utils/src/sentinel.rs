//! An in-process sentinel that records JSON-RPC requests.
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use sentinel_client::SentinelClient;
use serde_json::{json, Value};
use std::{
    io,
    sync::{Arc, Mutex},
};
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::warn;

#[derive(Debug, Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    response: Value,
}

async fn handle_rpc(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.requests.lock().unwrap().push(body);
    (state.status, Json(state.response))
}

/// A mock sentinel listening on a local port.
///
/// Every request body is recorded and answered with a fixed status and JSON
/// response. Requests without a JSON content type are rejected by the
/// extractor and not recorded. The server stops when this is dropped.
#[derive(Debug)]
pub struct MockSentinel {
    url: reqwest::Url,
    requests: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl MockSentinel {
    /// The response sent by [`MockSentinel::spawn`].
    pub fn default_response() -> Value {
        json!({ "jsonrpc": "2.0", "id": 1, "result": { "code": 0, "txs": [] } })
    }

    /// Spawn a sentinel that answers `200 OK` with
    /// [`MockSentinel::default_response`].
    pub async fn spawn() -> io::Result<Self> {
        Self::spawn_with(StatusCode::OK, Self::default_response()).await
    }

    /// Spawn a sentinel that answers every request with `status` and
    /// `response`.
    pub async fn spawn_with(status: StatusCode, response: Value) -> io::Result<Self> {
        let requests = Arc::<Mutex<Vec<Value>>>::default();
        let state = MockState { requests: requests.clone(), status, response };
        let app = Router::new().route("/", post(handle_rpc)).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let url = reqwest::Url::parse(&format!("http://{addr}/")).map_err(io::Error::other)?;

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!(%err, "Mock sentinel stopped");
            }
        });

        Ok(Self { url, requests, handle })
    }

    /// The URL the sentinel listens on.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// A client pointed at this sentinel.
    pub fn client(&self) -> SentinelClient {
        SentinelClient::new(self.url.clone())
    }

    /// Every request body received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockSentinel {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
