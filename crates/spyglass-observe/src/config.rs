//! Inspector behavior, supplied at construction time.
//!
//! There is no process-wide flag: a host that wants observability off
//! passes `enabled: false` (or wires the `NullSink`).

use serde::{Deserialize, Serialize};
use spyglass_core::LogLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Master switch. Disabled observers drop events before the sink but
    /// still invoke network continuations.
    pub enabled: bool,
    /// Ring capacity for the in-memory sink.
    pub max_events: usize,
    /// Events below this level are dropped at the observer boundary.
    pub min_level: LogLevel,
    /// Record request/response bodies, or elide them.
    pub capture_bodies: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_events: 50_000,
            min_level: LogLevel::Verbose,
            capture_bodies: true,
        }
    }
}

impl InspectorConfig {
    /// Config with everything off; observers become pass-through taps.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether an event at `level` should reach the sink.
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.enabled && level >= self.min_level
    }
}
