//! Span fields recorded by the client. Kept in its own test binary so no
//! global subscriber is installed.

use sentinel_client::BroadcastMode;
use sentinel_test_utils::{keys::TEST_SIGNERS, sentinel::MockSentinel};
use std::{
    fmt,
    sync::{Arc, Mutex},
};
use tracing::{
    field::{Field, Visit},
    span, Subscriber,
};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

/// Collects every `desired_height` recorded on a new span.
#[derive(Debug, Clone, Default)]
struct HeightRecorder(Arc<Mutex<Vec<u64>>>);

struct HeightVisitor<'a>(&'a Mutex<Vec<u64>>);

impl Visit for HeightVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "desired_height" {
            self.0.lock().unwrap().push(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

impl<S: Subscriber> Layer<S> for HeightRecorder {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
        attrs.record(&mut HeightVisitor(&self.0));
    }
}

#[tokio::test]
async fn send_bundle_span_records_height() {
    let recorder = HeightRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let sentinel = MockSentinel::spawn().await.unwrap();
    let signed = TEST_SIGNERS[0].sign_base64(&["dGVzdA=="]).unwrap();
    sentinel.client().send_bundle(&signed, 4242, BroadcastMode::Sync).await.unwrap();

    assert_eq!(*recorder.0.lock().unwrap(), vec![4242]);
}
