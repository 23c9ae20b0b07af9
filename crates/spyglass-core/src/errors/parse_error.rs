//! Deserialization errors for the wire event schema.

/// Errors raised when reconstructing events from their JSON form.
///
/// Missing *optional* fields never error — they default. These variants
/// cover the genuinely required correlation fields and values that cannot
/// be coerced without substituting wrong data.
#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("event JSON is not an object")]
    NotAnObject,

    #[error("required field missing: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("unknown event type: {event_type}")]
    UnknownEventType { event_type: String },
}
