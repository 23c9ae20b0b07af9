//! # spyglass-core
//!
//! Foundation crate for the spyglass inspector.
//! Defines the log-event taxonomy, the observer contracts the host's
//! subsystems call into, the sink trait everything funnels to, and the
//! errors. Every value here is immutable once constructed; the machinery
//! that forwards, tracks, and stores events lives in `spyglass-observe`.

pub mod context;
pub mod errors;
pub mod events;
pub mod ids;
pub mod observers;
pub mod time;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use context::ObservabilityContext;
pub use errors::{EventParseError, SinkError};
pub use events::{
    ActionLog, ActionStatus, ErrorLog, EventKind, GenericLog, LogEvent, LogLevel, NetworkErrorLog,
    NetworkRequestLog, NetworkResponseLog, StateEventType, StateLog, StateScopeType,
};
pub use observers::{
    ActionObserver, FailureSnapshot, NetworkObserver, NoopObserver, RequestSnapshot,
    ResponseSnapshot, StateObserver,
};
pub use ids::{IIdGenerator, RandomIdGenerator, SequenceIdGenerator};
pub use traits::{IEventSink, NullSink};
