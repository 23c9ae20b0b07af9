//! Sink that delivers each event to every registered sub-sink.

use std::sync::Arc;

use spyglass_core::{IEventSink, LogEvent, SinkError};

/// Fans one event out to many sinks. A failing sub-sink is warned about
/// and skipped; the remaining sinks still receive the event.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn IEventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn IEventSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn IEventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl IEventSink for FanoutSink {
    fn log(&self, event: LogEvent) -> Result<(), SinkError> {
        for sink in &self.sinks {
            if let Err(error) = sink.log(event.clone()) {
                tracing::warn!(%error, "fanout sub-sink rejected an event");
            }
        }
        Ok(())
    }
}
