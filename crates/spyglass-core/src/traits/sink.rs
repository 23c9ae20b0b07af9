//! The single ingestion point all observers funnel into.

use crate::errors::SinkError;
use crate::events::LogEvent;

/// Accepts one event at a time. Owns no logic beyond that.
///
/// Implementations must accept any concrete variant and stay cheap per
/// call — observers invoke `log` from the hot paths of the instrumented
/// subsystem, so a sink that needs I/O or heavy work must queue it.
/// Callers at the observer boundary swallow the returned error;
/// instrumentation never raises into the caller that triggered the event.
pub trait IEventSink: Send + Sync {
    fn log(&self, event: LogEvent) -> Result<(), SinkError>;
}

/// Sink that drops every event. Lets hosts keep observers wired while
/// inspection is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl IEventSink for NullSink {
    fn log(&self, _event: LogEvent) -> Result<(), SinkError> {
        Ok(())
    }
}
