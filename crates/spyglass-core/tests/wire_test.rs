use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use spyglass_core::errors::EventParseError;
use spyglass_core::events::{
    ActionLog, ActionStatus, ErrorLog, EventKind, LogEvent, LogLevel, NetworkErrorLog,
    NetworkRequestLog, NetworkResponseLog, StateEventType, StateLog, StateScopeType,
};

fn fixed_event(kind: EventKind) -> LogEvent {
    LogEvent::new(kind)
        .with_id("evt0000001")
        .with_timestamp(Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap())
        .with_category("demo")
        .with_tags(["alpha", "beta"])
}

/// Typed reconstruction must reproduce every field, metadata included.
fn assert_exact_roundtrip(
    event: &LogEvent,
    from_json: fn(&Value) -> Result<LogEvent, EventParseError>,
) {
    let wire = event.to_json();
    let parsed = from_json(&wire).expect("typed reconstruction");
    assert_eq!(parsed.id, event.id);
    assert_eq!(parsed.level, event.level);
    assert_eq!(parsed.timestamp, event.timestamp);
    assert_eq!(parsed.category, event.category);
    assert_eq!(parsed.tags, event.tags);
    assert_eq!(parsed.kind, event.kind);
    assert_eq!(parsed.metadata(), event.metadata());
}

#[test]
fn wire_shape_has_the_required_keys() {
    let event = fixed_event(EventKind::Error(ErrorLog::new("boom")));
    let wire = event.to_json();
    let obj = wire.as_object().unwrap();

    for key in [
        "id",
        "eventType",
        "level",
        "timestamp",
        "title",
        "description",
        "tags",
        "metadata",
    ] {
        assert!(obj.contains_key(key), "missing {key}");
    }
    assert_eq!(obj["timestamp"], json!("2026-01-03T12:00:00.000Z"));
    assert_eq!(obj["level"], json!("error"));
    assert_eq!(obj["tags"], json!(["alpha", "beta"]));
}

#[test]
fn category_is_omitted_when_absent() {
    let event = ErrorLog::new("boom").into_event();
    let wire = event.to_json();
    assert!(wire.as_object().unwrap().get("category").is_none());
}

#[test]
fn network_request_roundtrip_is_exact() {
    let log = NetworkRequestLog {
        request_id: "r1".into(),
        method: "POST".into(),
        url: "https://api.x/users".into(),
        headers: BTreeMap::from([("content-type".into(), "application/json".into())]),
        query_parameters: BTreeMap::from([("page".into(), "2".into())]),
        body: Some(json!({"name": "Ada"})),
        body_size: Some(18),
        api_name: Some("createUser".into()),
        api_id: Some("api-7".into()),
    };
    let event = fixed_event(EventKind::NetworkRequest(log));
    assert_exact_roundtrip(&event, NetworkRequestLog::from_json);
}

#[test]
fn network_response_roundtrip_is_exact() {
    let log = NetworkResponseLog {
        request_id: "r1".into(),
        status_code: 201,
        headers: BTreeMap::from([("etag".into(), "abc".into())]),
        body: Some(json!({"id": 9})),
        response_size: Some(12),
        duration: Some(Duration::from_millis(87)),
        url: Some("https://api.x/users".into()),
    };
    let event = fixed_event(EventKind::NetworkResponse(log));
    assert_exact_roundtrip(&event, NetworkResponseLog::from_json);
}

#[test]
fn network_error_roundtrip_is_exact() {
    let log = NetworkErrorLog {
        request_id: "r1".into(),
        error: "connection refused".into(),
        stack_trace: Some("frame 1\nframe 2".into()),
        failed_url: Some("https://api.x/users".into()),
        failed_method: Some("GET".into()),
    };
    let event = fixed_event(EventKind::NetworkError(log));
    assert_exact_roundtrip(&event, NetworkErrorLog::from_json);
}

#[test]
fn action_roundtrip_is_exact() {
    let log = ActionLog {
        event_id: "a1".into(),
        action_type: "callRestApi".into(),
        status: ActionStatus::Completed,
        execution_time: Some(Duration::from_millis(320)),
        parent_event_id: Some("a0".into()),
        source_chain: vec!["HomePage".into(), "Card".into()],
        trigger_name: Some("onClick".into()),
        action_definition: json!({"api": "createUser"}),
        resolved_parameters: json!({"name": "Ada"}),
        progress_data: Some(json!({"sent": 1})),
        error_message: None,
        stack_trace: None,
    };
    let event = fixed_event(EventKind::Action(log));
    assert_exact_roundtrip(&event, ActionLog::from_json);
}

#[test]
fn state_roundtrip_is_exact() {
    let log = StateLog {
        state_id: "p1".into(),
        scope_type: StateScopeType::Page,
        namespace: Some("stack-2".into()),
        event: StateEventType::Change,
        args: Some(json!({"userId": 9})),
        initial_state: None,
        changes: Some(json!({"count": 1})),
        previous_state: Some(json!({"count": 0})),
        current_state: Some(json!({"count": 1})),
        final_state: None,
        error_message: None,
        stack_trace: None,
    };
    let event = fixed_event(EventKind::State(log));
    assert_exact_roundtrip(&event, StateLog::from_json);
}

#[test]
fn error_roundtrip_is_exact() {
    let log = ErrorLog {
        error: "index out of range".into(),
        stack_trace: Some("frame".into()),
        source: Some("expression evaluator".into()),
    };
    let event = fixed_event(EventKind::Error(log));
    assert_exact_roundtrip(&event, ErrorLog::from_json);
}

#[test]
fn base_from_json_degrades_to_generic() {
    let event = fixed_event(EventKind::NetworkRequest(NetworkRequestLog {
        request_id: "r1".into(),
        method: "GET".into(),
        url: "https://api.x/users".into(),
        ..Default::default()
    }));
    let wire = event.to_json();
    let generic = LogEvent::from_json(&wire).unwrap();

    // Concrete-type identity is lost, but nothing else is.
    assert_eq!(generic.event_type(), "network_request");
    assert!(matches!(generic.kind, EventKind::Generic(_)));
    assert_eq!(generic.id, event.id);
    assert_eq!(generic.level, event.level);
    assert_eq!(generic.timestamp, event.timestamp);
    assert_eq!(generic.tags, event.tags);
    assert_eq!(generic.title(), event.title());
    assert_eq!(generic.description(), event.description());
    assert_eq!(generic.metadata(), event.metadata());
}

#[test]
fn base_from_json_defaults_optional_fields() {
    let wire = json!({
        "eventType": "custom_probe",
        "title": "probe",
        "description": "",
        "metadata": {}
    });
    let event = LogEvent::from_json(&wire).unwrap();
    assert!(!event.id.is_empty());
    assert_eq!(event.level, LogLevel::Info);
    assert!(event.tags.is_empty());
    assert!(event.category.is_none());
}

#[test]
fn missing_correlation_fields_are_parse_errors() {
    let wire = json!({
        "eventType": "network_request",
        "metadata": {"method": "GET", "url": "https://api.x"}
    });
    let err = NetworkRequestLog::from_json(&wire).unwrap_err();
    assert!(matches!(
        err,
        EventParseError::MissingField { field: "requestId" }
    ));

    let wire = json!({
        "eventType": "state",
        "metadata": {"stateId": "p1", "stateEventType": "create"}
    });
    let err = StateLog::from_json(&wire).unwrap_err();
    assert!(matches!(
        err,
        EventParseError::MissingField { field: "stateType" }
    ));
}

#[test]
fn malformed_values_never_coerce() {
    let wire = json!({
        "eventType": "network_response",
        "metadata": {"requestId": "r1", "statusCode": "not a number"}
    });
    assert!(matches!(
        NetworkResponseLog::from_json(&wire).unwrap_err(),
        EventParseError::InvalidField { field: "statusCode", .. }
    ));

    let wire = json!({
        "eventType": "action",
        "metadata": {"eventId": "a1", "actionType": "navigate", "status": "paused"}
    });
    assert!(matches!(
        ActionLog::from_json(&wire).unwrap_err(),
        EventParseError::InvalidField { field: "status", .. }
    ));

    let wire = json!({
        "eventType": "error",
        "timestamp": "yesterday",
        "metadata": {"error": "boom"}
    });
    assert!(matches!(
        ErrorLog::from_json(&wire).unwrap_err(),
        EventParseError::InvalidTimestamp { .. }
    ));
}

#[test]
fn typed_from_json_rejects_other_event_types() {
    let wire = fixed_event(EventKind::Error(ErrorLog::new("boom"))).to_json();
    assert!(matches!(
        NetworkRequestLog::from_json(&wire).unwrap_err(),
        EventParseError::UnknownEventType { .. }
    ));
}

#[test]
fn non_object_json_is_rejected() {
    assert!(matches!(
        LogEvent::from_json(&json!("nope")).unwrap_err(),
        EventParseError::NotAnObject
    ));
}

#[test]
fn unknown_metadata_keys_are_ignored_not_fatal() {
    let wire = json!({
        "eventType": "network_request",
        "metadata": {
            "requestId": "r1",
            "futureField": {"nested": true}
        }
    });
    let event = NetworkRequestLog::from_json(&wire).unwrap();
    match &event.kind {
        EventKind::NetworkRequest(log) => {
            assert_eq!(log.request_id, "r1");
            assert!(log.method.is_empty());
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}
