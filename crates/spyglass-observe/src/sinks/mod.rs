//! Stock sinks.

pub mod fanout;
pub mod memory;
pub mod tracing_sink;

pub use fanout::FanoutSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;

// Hosts that wire observers while inspection is off use the core NullSink.
pub use spyglass_core::NullSink;
