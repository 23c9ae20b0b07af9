//! In-memory ring buffer of events for inspection surfaces.

use std::collections::VecDeque;
use std::sync::Mutex;

use spyglass_core::{IEventSink, LogEvent, SinkError};

use crate::config::InspectorConfig;

/// Bounded in-memory store. Oldest events are dropped once the capacity
/// is reached. `log` does nothing heavier than a push under a short lock.
#[derive(Debug)]
pub struct MemorySink {
    events: Mutex<VecDeque<LogEvent>>,
    max_events: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_capacity(InspectorConfig::default().max_events)
    }

    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            max_events,
        }
    }

    pub fn from_config(config: &InspectorConfig) -> Self {
        Self::with_capacity(config.max_events)
    }

    /// All retained events, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Retained events matching a search query.
    pub fn find(&self, query: &str) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.matches(query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl IEventSink for MemorySink {
    fn log(&self, event: LogEvent) -> Result<(), SinkError> {
        if self.max_events == 0 {
            return Ok(());
        }
        let mut events = self.events.lock().map_err(|_| SinkError::Closed)?;
        if events.len() == self.max_events {
            events.pop_front();
        }
        events.push_back(event);
        Ok(())
    }
}
