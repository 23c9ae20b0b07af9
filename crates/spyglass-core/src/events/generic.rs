//! Generic and error variants.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::EventParseError;

use super::base::{EventKind, LogEvent};
use super::wire::{self, WireBase};

/// Application-level failure that belongs to no other variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorLog {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    /// Subsystem or location that raised the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ErrorLog {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }

    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::Error(self))
    }

    pub(crate) fn title(&self) -> String {
        match &self.source {
            Some(source) => format!("Error in {source}"),
            None => "Error".to_string(),
        }
    }

    pub(crate) fn description(&self) -> String {
        self.error.clone()
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("error".into(), json!(self.error));
        if let Some(trace) = &self.stack_trace {
            meta.insert("stackTrace".into(), json!(trace));
        }
        if let Some(source) = &self.source {
            meta.insert("source".into(), json!(source));
        }
        meta
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.error.to_lowercase().contains(needle)
            || self
                .source
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }

    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "error")?;
        let meta = wire::metadata(obj);
        let log = Self {
            error: wire::opt_string(&meta, "error").unwrap_or_default(),
            stack_trace: wire::opt_string(&meta, "stackTrace"),
            source: wire::opt_string(&meta, "source"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::Error(log)))
    }
}

/// Fallback payload: what [`LogEvent::from_json`] reconstructs when the
/// concrete variant is unknown. Carries exactly the serialized title,
/// description, and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericLog {
    pub event_type: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl GenericLog {
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::Generic(self))
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.metadata
            .values()
            .filter_map(Value::as_str)
            .any(|v| v.to_lowercase().contains(needle))
    }
}
