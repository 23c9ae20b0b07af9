//! Observers that forward into a registered sink.
//!
//! These are the default implementations of the core contracts. They obey
//! the boundary rule: a sink failure is swallowed and warned about, never
//! propagated into the subsystem that raised the callback.

pub mod action;
pub mod network;
pub mod state;

pub use action::ForwardingActionObserver;
pub use network::ForwardingNetworkObserver;
pub use state::ForwardingStateObserver;

use std::sync::Arc;

use spyglass_core::{IEventSink, LogEvent};

pub(crate) fn forward_to_sink(sink: &Arc<dyn IEventSink>, event: LogEvent) {
    if let Err(error) = sink.log(event) {
        tracing::warn!(%error, "event sink rejected an event");
    }
}
