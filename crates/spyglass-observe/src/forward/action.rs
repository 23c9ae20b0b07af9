//! Sink-forwarding action observer with execution-time aggregation.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use spyglass_core::events::ActionLog;
use spyglass_core::observers::ActionObserver;
use spyglass_core::IEventSink;

use super::forward_to_sink;
use crate::config::InspectorConfig;

/// Forwards every action callback to the sink.
///
/// Terminal callbacks (`on_action_complete` with status completed or
/// error) that arrive without an `execution_time` get one computed as the
/// delta from the matching `on_action_start` for the same `event_id`.
/// Start instants are dropped once the attempt terminates, so abandoned
/// ids do not accumulate past their lifecycle.
pub struct ForwardingActionObserver {
    sink: Arc<dyn IEventSink>,
    config: InspectorConfig,
    started: DashMap<String, Instant>,
}

impl ForwardingActionObserver {
    pub fn new(sink: Arc<dyn IEventSink>) -> Self {
        Self {
            sink,
            config: InspectorConfig::default(),
            started: DashMap::new(),
        }
    }

    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    fn emit(&self, log: ActionLog) {
        let event = log.into_event();
        if self.config.should_log(event.level) {
            forward_to_sink(&self.sink, event);
        }
    }
}

impl ActionObserver for ForwardingActionObserver {
    fn on_action_pending(&self, action: &ActionLog) {
        self.emit(action.clone());
    }

    fn on_action_start(&self, action: &ActionLog) {
        self.started.insert(action.event_id.clone(), Instant::now());
        self.emit(action.clone());
    }

    fn on_action_progress(&self, action: &ActionLog) {
        self.emit(action.clone());
    }

    fn on_action_complete(&self, action: &ActionLog) {
        let mut log = action.clone();
        match self.started.remove(&log.event_id) {
            Some((_, started)) if log.execution_time.is_none() => {
                log.execution_time = Some(started.elapsed());
            }
            _ => {}
        }
        self.emit(log);
    }

    fn on_action_disabled(&self, action: &ActionLog) {
        // Disabled is terminal straight from pending; clear any stray entry.
        self.started.remove(&action.event_id);
        self.emit(action.clone());
    }
}
