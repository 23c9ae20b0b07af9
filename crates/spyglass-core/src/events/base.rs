use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::EventParseError;
use crate::ids::{IIdGenerator, RandomIdGenerator};
use crate::time;

use super::action::{ActionLog, ActionStatus};
use super::generic::{ErrorLog, GenericLog};
use super::level::LogLevel;
use super::network::{NetworkErrorLog, NetworkRequestLog, NetworkResponseLog};
use super::state::{StateEventType, StateLog};
use super::wire::{self, WireBase};

/// Per-variant payload. Serialized as a tagged enum so the concrete type
/// survives serde round trips; the wire shape produced by
/// [`LogEvent::to_json`] is a separate, flatter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NetworkRequest(NetworkRequestLog),
    NetworkResponse(NetworkResponseLog),
    NetworkError(NetworkErrorLog),
    Action(ActionLog),
    State(StateLog),
    Error(ErrorLog),
    Generic(GenericLog),
}

impl EventKind {
    /// Stable type discriminator used as `eventType` on the wire.
    pub fn event_type(&self) -> &str {
        match self {
            Self::NetworkRequest(_) => "network_request",
            Self::NetworkResponse(_) => "network_response",
            Self::NetworkError(_) => "network_error",
            Self::Action(_) => "action",
            Self::State(_) => "state",
            Self::Error(_) => "error",
            Self::Generic(log) => &log.event_type,
        }
    }

    /// Severity implied by the payload when the caller does not override it.
    pub fn default_level(&self) -> LogLevel {
        match self {
            Self::NetworkRequest(_) => LogLevel::Info,
            Self::NetworkResponse(log) => LogLevel::from_status(log.status_code),
            Self::NetworkError(_) => LogLevel::Error,
            Self::Action(log) => {
                if log.status == ActionStatus::Error {
                    LogLevel::Error
                } else {
                    LogLevel::Info
                }
            }
            Self::State(log) => {
                if log.event == StateEventType::Error {
                    LogLevel::Error
                } else {
                    LogLevel::Info
                }
            }
            Self::Error(_) => LogLevel::Error,
            Self::Generic(_) => LogLevel::Info,
        }
    }

    pub(crate) fn title(&self) -> String {
        match self {
            Self::NetworkRequest(log) => log.title(),
            Self::NetworkResponse(log) => log.title(),
            Self::NetworkError(log) => log.title(),
            Self::Action(log) => log.title(),
            Self::State(log) => log.title(),
            Self::Error(log) => log.title(),
            Self::Generic(log) => log.title.clone(),
        }
    }

    pub(crate) fn description(&self) -> String {
        match self {
            Self::NetworkRequest(log) => log.description(),
            Self::NetworkResponse(log) => log.description(),
            Self::NetworkError(log) => log.description(),
            Self::Action(log) => log.description(),
            Self::State(log) => log.description(),
            Self::Error(log) => log.description(),
            Self::Generic(log) => log.description.clone(),
        }
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        match self {
            Self::NetworkRequest(log) => log.metadata(),
            Self::NetworkResponse(log) => log.metadata(),
            Self::NetworkError(log) => log.metadata(),
            Self::Action(log) => log.metadata(),
            Self::State(log) => log.metadata(),
            Self::Error(log) => log.metadata(),
            Self::Generic(log) => log.metadata.clone(),
        }
    }

    /// Variant-specific searchable fields; `needle` is already lowercased.
    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        match self {
            Self::NetworkRequest(log) => log.matches_extra(needle),
            Self::NetworkResponse(log) => log.matches_extra(needle),
            Self::NetworkError(log) => log.matches_extra(needle),
            Self::Action(log) => log.matches_extra(needle),
            Self::State(log) => log.matches_extra(needle),
            Self::Error(log) => log.matches_extra(needle),
            Self::Generic(log) => log.matches_extra(needle),
        }
    }
}

/// A single observed occurrence.
///
/// Identity is the `id` alone — equality and hashing ignore every other
/// field. Constructed once at the moment the occurrence is observed and
/// immutable thereafter; overrides go through the `with_*` methods, each
/// of which produces a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Base-62 short id, generated when the caller does not supply one.
    pub id: String,
    /// Severity.
    pub level: LogLevel,
    /// When the underlying occurrence was observed (UTC).
    pub timestamp: DateTime<Utc>,
    /// Optional coarse grouping for display surfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags. Membership matters, order does not.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// The typed payload.
    pub kind: EventKind,
}

impl LogEvent {
    /// Build an event around a payload: generated id, `now` timestamp, and
    /// the severity the payload implies. Construction never fails.
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: RandomIdGenerator.event_id(),
            level: kind.default_level(),
            timestamp: time::now(),
            category: None,
            tags: BTreeSet::new(),
            kind,
        }
    }

    // --- copy-with-overrides ---

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    // --- derived accessors ---

    pub fn event_type(&self) -> &str {
        self.kind.event_type()
    }

    pub fn title(&self) -> String {
        self.kind.title()
    }

    pub fn description(&self) -> String {
        self.kind.description()
    }

    pub fn metadata(&self) -> Map<String, Value> {
        self.kind.metadata()
    }

    // --- search ---

    /// Case-insensitive substring search over title, description,
    /// category, tags, and event type, extended — never replaced — by the
    /// variant's own searchable fields. An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.base_matches(&needle) || self.kind.matches_extra(&needle)
    }

    fn base_matches(&self, needle: &str) -> bool {
        self.title().to_lowercase().contains(needle)
            || self.description().to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.event_type().to_lowercase().contains(needle)
    }

    // --- wire schema ---

    /// The on-the-wire/at-rest shape: `{id, eventType, level, timestamp,
    /// title, description, category?, tags, metadata}`. Timestamps are
    /// ISO-8601 UTC with millisecond precision.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("id".into(), json!(self.id));
        obj.insert("eventType".into(), json!(self.event_type()));
        obj.insert("level".into(), json!(self.level.as_str()));
        obj.insert("timestamp".into(), json!(time::format_iso(&self.timestamp)));
        obj.insert("title".into(), json!(self.title()));
        obj.insert("description".into(), json!(self.description()));
        if let Some(category) = &self.category {
            obj.insert("category".into(), json!(category));
        }
        obj.insert(
            "tags".into(),
            Value::Array(self.tags.iter().map(|t| json!(t)).collect()),
        );
        obj.insert("metadata".into(), Value::Object(self.metadata()));
        Value::Object(obj)
    }

    /// Reconstruct from the wire shape as a [`GenericLog`] event.
    ///
    /// The base factory cannot know the concrete variant, so the typed
    /// fields stay inside `metadata` and the concrete type is lost — use
    /// the payload types' own `from_json` for an exact typed
    /// reconstruction.
    pub fn from_json(value: &Value) -> Result<Self, EventParseError> {
        let obj = wire::object(value)?;
        let base = WireBase::parse(obj)?;
        let generic = GenericLog {
            event_type: obj
                .get("eventType")
                .and_then(Value::as_str)
                .ok_or(EventParseError::MissingField { field: "eventType" })?
                .to_string(),
            title: wire::opt_string(obj, "title").unwrap_or_default(),
            description: wire::opt_string(obj, "description").unwrap_or_default(),
            metadata: wire::metadata(obj),
        };
        Ok(base.into_event(EventKind::Generic(generic)))
    }
}

/// Identity equality: two events are the same event iff their ids match.
impl PartialEq for LogEvent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LogEvent {}

impl Hash for LogEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
