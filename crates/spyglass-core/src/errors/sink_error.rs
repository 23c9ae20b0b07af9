//! Failures a sink implementation may report from `log`.
//!
//! These never cross the observer boundary: forwarding observers swallow
//! them so instrumentation cannot raise into the instrumented subsystem.

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink is closed")]
    Closed,

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("sink I/O failed: {message}")]
    Io { message: String },
}
