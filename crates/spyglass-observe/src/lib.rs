//! # spyglass-observe
//!
//! Default machinery on top of the `spyglass-core` contracts: observers
//! that forward into a sink, per-scope snapshot tracking, and the stock
//! sinks (in-memory ring buffer, tracing, fan-out).

pub mod config;
pub mod forward;
pub mod scope;
pub mod sinks;

pub use config::InspectorConfig;
pub use forward::{ForwardingActionObserver, ForwardingNetworkObserver, ForwardingStateObserver};
pub use scope::{ScopeKey, ScopePhase, ScopeTracker};
pub use sinks::{FanoutSink, MemorySink, TracingSink};
