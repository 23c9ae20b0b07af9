//! The polymorphic log-event data model.
//!
//! One base struct ([`LogEvent`]) carries identity, severity, timestamp,
//! category, and tags; the tagged [`EventKind`] enum carries the
//! per-variant payload. Identity is the `id` alone — two events with the
//! same id are the same event regardless of every other field.

pub mod action;
pub mod base;
pub mod generic;
pub mod level;
pub mod network;
pub mod state;
pub(crate) mod wire;

pub use action::{ActionLog, ActionStatus};
pub use base::{EventKind, LogEvent};
pub use generic::{ErrorLog, GenericLog};
pub use level::LogLevel;
pub use network::{NetworkErrorLog, NetworkRequestLog, NetworkResponseLog};
pub use state::{StateEventType, StateLog, StateScopeType};
