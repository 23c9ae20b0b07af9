//! Sink that re-emits events through `tracing`.

use spyglass_core::{IEventSink, LogEvent, LogLevel, SinkError};

/// Forwards each event to the host's `tracing` subscriber at the level
/// mapped from the event's severity. Owns no storage; useful when the
/// display surface is an ordinary log pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl IEventSink for TracingSink {
    fn log(&self, event: LogEvent) -> Result<(), SinkError> {
        let title = event.title();
        let event_type = event.event_type().to_string();
        match event.level {
            LogLevel::Verbose => {
                tracing::trace!(id = %event.id, %event_type, "{title}");
            }
            LogLevel::Debug => {
                tracing::debug!(id = %event.id, %event_type, "{title}");
            }
            LogLevel::Info => {
                tracing::info!(id = %event.id, %event_type, "{title}");
            }
            LogLevel::Warning => {
                tracing::warn!(id = %event.id, %event_type, "{title}");
            }
            LogLevel::Error | LogLevel::Critical => {
                tracing::error!(id = %event.id, %event_type, "{title}");
            }
        }
        Ok(())
    }
}
