use std::sync::Arc;
use std::time::Duration;

use spyglass_core::events::{ActionLog, ActionStatus, EventKind};
use spyglass_core::observers::ActionObserver;
use spyglass_core::LogLevel;
use spyglass_observe::{ForwardingActionObserver, InspectorConfig, MemorySink};

fn action(event_id: &str, status: ActionStatus) -> ActionLog {
    ActionLog {
        event_id: event_id.into(),
        action_type: "callRestApi".into(),
        status,
        ..Default::default()
    }
}

fn logged_statuses(sink: &MemorySink) -> Vec<ActionStatus> {
    sink.events()
        .iter()
        .map(|event| match &event.kind {
            EventKind::Action(log) => log.status,
            other => panic!("unexpected kind: {other:?}"),
        })
        .collect()
}

#[test]
fn forwards_the_full_lifecycle_in_order() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_pending(&action("a1", ActionStatus::Pending));
    observer.on_action_start(&action("a1", ActionStatus::Running));
    observer.on_action_progress(&action("a1", ActionStatus::Running));
    observer.on_action_complete(&action("a1", ActionStatus::Completed));

    assert_eq!(
        logged_statuses(&sink),
        vec![
            ActionStatus::Pending,
            ActionStatus::Running,
            ActionStatus::Running,
            ActionStatus::Completed,
        ]
    );
}

#[test]
fn computes_execution_time_from_the_start_delta() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_start(&action("a1", ActionStatus::Running));
    observer.on_action_complete(&action("a1", ActionStatus::Completed));

    let events = sink.events();
    match &events[1].kind {
        EventKind::Action(log) => assert!(log.execution_time.is_some()),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn a_supplied_execution_time_is_preserved() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_start(&action("a1", ActionStatus::Running));
    let mut done = action("a1", ActionStatus::Completed);
    done.execution_time = Some(Duration::from_millis(777));
    observer.on_action_complete(&done);

    match &sink.events()[1].kind {
        EventKind::Action(log) => {
            assert_eq!(log.execution_time, Some(Duration::from_millis(777)));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn error_terminals_get_a_duration_too() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_start(&action("a1", ActionStatus::Running));
    let mut failed = action("a1", ActionStatus::Error);
    failed.error_message = Some("guard rejected".into());
    observer.on_action_complete(&failed);

    let events = sink.events();
    assert_eq!(events[1].level, LogLevel::Error);
    match &events[1].kind {
        EventKind::Action(log) => assert!(log.execution_time.is_some()),
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn disabled_is_forwarded_straight_from_pending() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_pending(&action("a1", ActionStatus::Pending));
    observer.on_action_disabled(&action("a1", ActionStatus::Disabled));

    assert_eq!(
        logged_statuses(&sink),
        vec![ActionStatus::Pending, ActionStatus::Disabled]
    );
}

#[test]
fn independent_attempts_are_timed_independently() {
    let sink = Arc::new(MemorySink::new());
    let observer = ForwardingActionObserver::new(sink.clone());

    observer.on_action_start(&action("a1", ActionStatus::Running));
    observer.on_action_start(&action("a2", ActionStatus::Running));
    observer.on_action_complete(&action("a2", ActionStatus::Completed));
    observer.on_action_complete(&action("a1", ActionStatus::Completed));

    for event in sink.events().iter().skip(2) {
        match &event.kind {
            EventKind::Action(log) => assert!(log.execution_time.is_some()),
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}

#[test]
fn disabled_observer_forwards_nothing() {
    let sink = Arc::new(MemorySink::new());
    let observer =
        ForwardingActionObserver::new(sink.clone()).with_config(InspectorConfig::disabled());

    observer.on_action_pending(&action("a1", ActionStatus::Pending));
    observer.on_action_complete(&action("a1", ActionStatus::Completed));

    assert!(sink.is_empty());
}
