//! Sink-forwarding state observer with snapshot enrichment.

use std::sync::Arc;

use spyglass_core::events::StateLog;
use spyglass_core::observers::StateObserver;
use spyglass_core::IEventSink;

use super::forward_to_sink;
use crate::config::InspectorConfig;
use crate::scope::{ScopeKey, ScopeTracker};

/// Forwards every state callback to the sink and keeps the per-scope
/// snapshot needed to fill `previous_state`/`current_state` when the
/// caller only supplies a delta, and `final_state` on dispose.
pub struct ForwardingStateObserver {
    sink: Arc<dyn IEventSink>,
    config: InspectorConfig,
    tracker: ScopeTracker,
}

impl ForwardingStateObserver {
    pub fn new(sink: Arc<dyn IEventSink>) -> Self {
        Self {
            sink,
            config: InspectorConfig::default(),
            tracker: ScopeTracker::new(),
        }
    }

    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// The scope tracker backing enrichment. Inspection surfaces can read
    /// current snapshots from here.
    pub fn tracker(&self) -> &ScopeTracker {
        &self.tracker
    }

    fn emit(&self, log: StateLog) {
        let event = log.into_event();
        if self.config.should_log(event.level) {
            forward_to_sink(&self.sink, event);
        }
    }
}

impl StateObserver for ForwardingStateObserver {
    fn on_create(&self, state: &StateLog) {
        self.tracker
            .on_create(&ScopeKey::of(state), state.initial_state.clone());
        self.emit(state.clone());
    }

    fn on_change(&self, state: &StateLog) {
        let mut log = state.clone();
        let key = ScopeKey::of(state);
        let (previous, current) =
            self.tracker
                .apply_change(&key, log.changes.clone(), log.current_state.clone());
        if log.previous_state.is_none() {
            log.previous_state = previous;
        }
        if log.current_state.is_none() {
            log.current_state = current;
        }
        self.emit(log);
    }

    fn on_dispose(&self, state: &StateLog) {
        let mut log = state.clone();
        let last = self.tracker.on_dispose(&ScopeKey::of(state));
        if log.final_state.is_none() {
            log.final_state = last;
        }
        self.emit(log);
    }

    fn on_error(&self, state: &StateLog) {
        self.emit(state.clone());
    }
}
