//! Client and sender behavior against an in-process sentinel.

use axum::http::StatusCode;
use sentinel_bundle::SentinelBundle;
use sentinel_client::{
    BroadcastMode, BundleSender, BundleSenderError, SentinelClient, SentinelError,
    SentinelSubmitter,
};
use sentinel_test_utils::{
    init_tracing,
    keys::TEST_SIGNERS,
    mocks::MockBundleSubmitter,
    sentinel::MockSentinel,
};
use serde_json::{json, Value};

fn bundle_params(signed: &sentinel_bundle::SignedBundle, height: &str) -> Value {
    json!([
        signed.transactions(),
        height,
        serde_json::to_value(signed.pub_key()).unwrap(),
        serde_json::to_value(signed.signature()).unwrap(),
    ])
}

#[tokio::test]
async fn sync_bundle_request() {
    init_tracing();
    let sentinel = MockSentinel::spawn().await.unwrap();
    let signed = TEST_SIGNERS[0].sign_base64(&["dGVzdA==", "AQID"]).unwrap();

    let response =
        sentinel.client().send_bundle(&signed, 42, BroadcastMode::Sync).await.unwrap();
    assert_eq!(response, MockSentinel::default_response());

    let requests = sentinel.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        json!({
            "method": "broadcast_bundle_sync",
            "params": bundle_params(&signed, "42"),
            "id": 1,
        })
    );
}

#[tokio::test]
async fn async_bundle_request() {
    init_tracing();
    let sentinel = MockSentinel::spawn().await.unwrap();
    let signed = TEST_SIGNERS[1].sign_base64(&["dGVzdA=="]).unwrap();

    sentinel.client().send_bundle(&signed, 0, BroadcastMode::Async).await.unwrap();

    let requests = sentinel.requests();
    assert_eq!(requests[0]["method"], "broadcast_bundle_async");
    assert_eq!(requests[0]["params"], bundle_params(&signed, "0"));
}

#[tokio::test]
async fn secure_transaction_request() {
    init_tracing();
    let sentinel = MockSentinel::spawn().await.unwrap();

    sentinel.client().send_secure_transaction("dGVzdA==").await.unwrap();

    assert_eq!(
        sentinel.requests(),
        vec![json!({ "method": "broadcast_secure_tx", "params": ["dGVzdA=="], "id": 1 })]
    );
}

#[tokio::test]
async fn rpc_error_returned_as_is() {
    init_tracing();
    let error = json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32602, "message": "bad" } });
    let sentinel = MockSentinel::spawn_with(StatusCode::OK, error.clone()).await.unwrap();
    let signed = TEST_SIGNERS[0].sign_base64(&["dGVzdA=="]).unwrap();

    let response = sentinel.client().send_bundle(&signed, 1, BroadcastMode::Sync).await.unwrap();
    assert_eq!(response, error);
}

#[tokio::test]
async fn http_error_status() {
    init_tracing();
    let sentinel =
        MockSentinel::spawn_with(StatusCode::SERVICE_UNAVAILABLE, json!({})).await.unwrap();

    let err = sentinel.client().send_secure_transaction("dGVzdA==").await.unwrap_err();
    assert!(matches!(err, SentinelError::Status(StatusCode::SERVICE_UNAVAILABLE)));
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    assert_eq!(sentinel.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_sentinel() {
    init_tracing();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let err = SentinelClient::new_from_string(&closed)
        .unwrap()
        .send_secure_transaction("dGVzdA==")
        .await
        .unwrap_err();
    assert!(matches!(err, SentinelError::Reqwest(_)));
}

#[test]
fn bad_url() {
    let err = SentinelClient::new_from_string("not a url").unwrap_err();
    assert!(matches!(err, SentinelError::Url(_)));
}

#[tokio::test]
async fn sender_signs_and_sends() {
    init_tracing();
    let sentinel = MockSentinel::spawn().await.unwrap();
    let submitter = SentinelSubmitter::new(sentinel.client(), 7, BroadcastMode::Sync);
    let sender = BundleSender::new(TEST_SIGNERS[2].clone(), submitter);

    let bundle = SentinelBundle::from_base64(&["dGVzdA==", "AQID"]).unwrap();
    let (signed, response) = sender.sign_and_send_bundle(&bundle).await.unwrap();

    signed.verify().unwrap();
    assert_eq!(response, MockSentinel::default_response());
    assert_eq!(sentinel.requests()[0]["params"], bundle_params(&signed, "7"));
}

#[tokio::test]
async fn sender_with_mock_submitter() {
    let submitter = MockBundleSubmitter::new();
    let sender = BundleSender::new(TEST_SIGNERS[0].clone(), submitter.clone());

    let bundle = SentinelBundle::from_base64(&["YQ==", "Yg=="]).unwrap();
    let (signed, ()) = sender.sign_and_send_bundle(&bundle).await.unwrap();

    assert_eq!(submitter.submitted_bundles(), vec![signed]);
}

#[tokio::test]
async fn sender_wraps_submission_errors() {
    init_tracing();
    let sentinel = MockSentinel::spawn_with(StatusCode::BAD_REQUEST, json!({})).await.unwrap();
    let sender = BundleSender::new(
        TEST_SIGNERS[0].clone(),
        SentinelSubmitter::new(sentinel.client(), 1, BroadcastMode::Async),
    );

    let bundle = SentinelBundle::from_base64(&["dGVzdA=="]).unwrap();
    let err = sender.sign_and_send_bundle(&bundle).await.unwrap_err();
    assert!(matches!(err, BundleSenderError::Submission(_)));
}
