use std::sync::Arc;

use serde_json::json;
use spyglass_core::events::EventKind;
use spyglass_core::observers::{
    FailureSnapshot, NetworkObserver, RequestSnapshot, ResponseSnapshot,
};
use spyglass_core::SequenceIdGenerator;
use spyglass_observe::{ForwardingNetworkObserver, InspectorConfig, MemorySink};

fn observer_with_sink() -> (ForwardingNetworkObserver, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingNetworkObserver::new(sink.clone())
        .with_id_generator(Arc::new(SequenceIdGenerator::new()));
    (observer, sink)
}

fn request_snapshot(correlation_id: Option<&str>) -> RequestSnapshot {
    RequestSnapshot {
        correlation_id: correlation_id.map(str::to_string),
        method: "GET".into(),
        url: "https://api.x/users".into(),
        ..Default::default()
    }
}

#[test]
fn synthesizes_an_id_and_writes_it_back() {
    let (observer, sink) = observer_with_sink();
    let mut snapshot = request_snapshot(None);
    let mut calls = 0;
    observer.on_request(&mut snapshot, &mut |seen| {
        calls += 1;
        // The continuation already sees the derived id.
        assert!(seen.correlation_id.is_some());
    });

    assert_eq!(calls, 1);
    assert_eq!(snapshot.correlation_id.as_deref(), Some("0000000000"));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    match &events[0].kind {
        EventKind::NetworkRequest(log) => assert_eq!(log.request_id, "0000000000"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn supplied_correlation_id_wins() {
    let (observer, sink) = observer_with_sink();
    let mut snapshot = request_snapshot(Some("r1"));
    observer.on_request(&mut snapshot, &mut |_| {});

    assert_eq!(snapshot.correlation_id.as_deref(), Some("r1"));
    match &sink.events()[0].kind {
        EventKind::NetworkRequest(log) => assert_eq!(log.request_id, "r1"),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn request_and_response_share_the_exchange_id() {
    let (observer, sink) = observer_with_sink();

    let mut request = request_snapshot(Some("r1"));
    observer.on_request(&mut request, &mut |_| {});

    let response = ResponseSnapshot {
        correlation_id: request.correlation_id.clone(),
        status_code: 404,
        ..Default::default()
    };
    observer.on_response(&response, &mut |_| {});

    let events = sink.events();
    assert_eq!(events.len(), 2);
    let (req, resp) = match (&events[0].kind, &events[1].kind) {
        (EventKind::NetworkRequest(req), EventKind::NetworkResponse(resp)) => (req, resp),
        other => panic!("unexpected kinds: {other:?}"),
    };
    assert_eq!(req.request_id, "r1");
    assert_eq!(resp.request_id, "r1");
    assert!(resp.is_client_error());
    assert!(!resp.is_success());
}

#[test]
fn failures_are_forwarded_with_the_exchange_id() {
    let (observer, sink) = observer_with_sink();
    let failure = FailureSnapshot {
        correlation_id: Some("r9".into()),
        error: "connection reset".into(),
        failed_url: Some("https://api.x/users".into()),
        failed_method: Some("GET".into()),
        ..Default::default()
    };
    let mut calls = 0;
    observer.on_error(&failure, &mut |_| calls += 1);

    assert_eq!(calls, 1);
    match &sink.events()[0].kind {
        EventKind::NetworkError(log) => {
            assert_eq!(log.request_id, "r9");
            assert_eq!(log.error, "connection reset");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn disabled_observer_still_runs_the_continuation() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingNetworkObserver::new(sink.clone())
        .with_config(InspectorConfig::disabled());

    let mut snapshot = request_snapshot(None);
    let mut calls = 0;
    observer.on_request(&mut snapshot, &mut |_| calls += 1);

    assert_eq!(calls, 1);
    assert!(sink.is_empty());
}

#[test]
fn bodies_are_elided_when_configured() {
    let sink = Arc::new(MemorySink::new());
    let config = InspectorConfig {
        capture_bodies: false,
        ..InspectorConfig::default()
    };
    let observer = ForwardingNetworkObserver::new(sink.clone()).with_config(config);

    let mut snapshot = RequestSnapshot {
        body: Some(json!({"secret": "hunter2"})),
        ..request_snapshot(Some("r1"))
    };
    observer.on_request(&mut snapshot, &mut |_| {});

    match &sink.events()[0].kind {
        EventKind::NetworkRequest(log) => assert!(log.body.is_none()),
        other => panic!("unexpected kind: {other:?}"),
    }
    // The snapshot itself is untouched; only the recorded copy is elided.
    assert!(snapshot.body.is_some());
}

#[test]
fn min_level_filters_successful_exchanges() {
    let sink = Arc::new(MemorySink::new());
    let config = InspectorConfig {
        min_level: spyglass_core::LogLevel::Error,
        ..InspectorConfig::default()
    };
    let observer = ForwardingNetworkObserver::new(sink.clone()).with_config(config);

    let ok = ResponseSnapshot {
        correlation_id: Some("r1".into()),
        status_code: 200,
        ..Default::default()
    };
    observer.on_response(&ok, &mut |_| {});
    assert!(sink.is_empty());

    let server_error = ResponseSnapshot {
        correlation_id: Some("r1".into()),
        status_code: 503,
        ..Default::default()
    };
    observer.on_response(&server_error, &mut |_| {});
    assert_eq!(sink.len(), 1);
}
