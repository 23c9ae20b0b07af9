//! Shared parsing helpers for the wire event schema.
//!
//! The wire shape is `{id, eventType, level, timestamp, title,
//! description, category?, tags, metadata}`. Base fields follow the
//! defaulting rules: a missing id is generated, a missing timestamp is
//! "now", missing tags are empty. Only malformed timestamps and the
//! variants' required correlation fields produce errors.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::errors::EventParseError;
use crate::events::base::{EventKind, LogEvent};
use crate::events::level::LogLevel;
use crate::ids::{IIdGenerator, RandomIdGenerator};
use crate::time;

/// Base fields parsed from a wire object, waiting for a payload.
pub(crate) struct WireBase {
    pub id: String,
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    pub category: Option<String>,
    pub tags: BTreeSet<String>,
}

impl WireBase {
    pub(crate) fn parse(obj: &Map<String, Value>) -> Result<Self, EventParseError> {
        let id = match obj.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => RandomIdGenerator.event_id(),
        };
        let level = obj
            .get("level")
            .and_then(Value::as_str)
            .and_then(LogLevel::parse)
            .unwrap_or_default();
        let timestamp = match obj.get("timestamp") {
            Some(Value::String(raw)) => time::parse_iso(raw)?,
            _ => time::now(),
        };
        let category = opt_string(obj, "category");
        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            id,
            level,
            timestamp,
            category,
            tags,
        })
    }

    pub(crate) fn into_event(self, kind: EventKind) -> LogEvent {
        LogEvent {
            id: self.id,
            level: self.level,
            timestamp: self.timestamp,
            category: self.category,
            tags: self.tags,
            kind,
        }
    }
}

pub(crate) fn object(value: &Value) -> Result<&Map<String, Value>, EventParseError> {
    value.as_object().ok_or(EventParseError::NotAnObject)
}

/// Fail unless the wire object declares the expected concrete type.
pub(crate) fn expect_event_type(
    obj: &Map<String, Value>,
    expected: &str,
) -> Result<(), EventParseError> {
    let found = obj
        .get("eventType")
        .and_then(Value::as_str)
        .ok_or(EventParseError::MissingField { field: "eventType" })?;
    if found == expected {
        Ok(())
    } else {
        Err(EventParseError::UnknownEventType {
            event_type: found.to_string(),
        })
    }
}

pub(crate) fn metadata(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn required_string(
    meta: &Map<String, Value>,
    field: &'static str,
) -> Result<String, EventParseError> {
    meta.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(EventParseError::MissingField { field })
}

pub(crate) fn opt_string(meta: &Map<String, Value>, field: &str) -> Option<String> {
    meta.get(field).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn opt_u64(meta: &Map<String, Value>, field: &str) -> Option<u64> {
    meta.get(field).and_then(Value::as_u64)
}

pub(crate) fn opt_value(meta: &Map<String, Value>, field: &str) -> Option<Value> {
    meta.get(field).filter(|v| !v.is_null()).cloned()
}

pub(crate) fn string_map(meta: &Map<String, Value>, field: &str) -> BTreeMap<String, String> {
    meta.get(field)
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn string_vec(meta: &Map<String, Value>, field: &str) -> Vec<String> {
    meta.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// `Value::Null` when absent — for fields that are always present on the
/// wire even when empty (`actionDefinition`, `resolvedParameters`).
pub(crate) fn value_or_null(meta: &Map<String, Value>, field: &str) -> Value {
    meta.get(field).cloned().unwrap_or(Value::Null)
}
