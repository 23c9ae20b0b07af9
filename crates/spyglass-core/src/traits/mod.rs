pub mod sink;

pub use sink::{IEventSink, NullSink};
