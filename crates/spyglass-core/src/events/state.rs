//! State log variant: one row per lifecycle event of a state scope.
//!
//! A scope is identified by `(state_id, scope_type, namespace)`. The
//! namespace disambiguates concurrent instances of the same scope type,
//! e.g. two copies of one page on a navigation stack. For a given
//! identity, events are causally ordered `create → change* →
//! (dispose | error)*`; reopening after dispose is a fresh scope.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::EventParseError;

use super::base::{EventKind, LogEvent};
use super::wire::{self, WireBase};

/// What owns the scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateScopeType {
    #[default]
    App,
    Page,
    Component,
    StateContainer,
}

impl StateScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Page => "page",
            Self::Component => "component",
            Self::StateContainer => "state_container",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "app" => Some(Self::App),
            "page" => Some(Self::Page),
            "component" => Some(Self::Component),
            "state_container" => Some(Self::StateContainer),
            _ => None,
        }
    }
}

/// Which lifecycle edge the event records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateEventType {
    #[default]
    Create,
    Change,
    Dispose,
    Error,
}

impl StateEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Change => "change",
            Self::Dispose => "dispose",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create" => Some(Self::Create),
            "change" => Some(Self::Change),
            "dispose" => Some(Self::Dispose),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One lifecycle event of a state scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateLog {
    pub state_id: String,
    pub scope_type: StateScopeType,
    /// Instance qualifier; part of the scope identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub event: StateEventType,
    /// Scope construction arguments; may accompany any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
    /// Full snapshot at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<Value>,
    /// Delta for change events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Value>,
    /// Full snapshot before the change, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_state: Option<Value>,
    /// Full snapshot after the change, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_state: Option<Value>,
    /// Full snapshot at disposal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl StateLog {
    /// A bare lifecycle event; snapshot fields start empty.
    pub fn new(
        state_id: impl Into<String>,
        scope_type: StateScopeType,
        event: StateEventType,
    ) -> Self {
        Self {
            state_id: state_id.into(),
            scope_type,
            event,
            ..Self::default()
        }
    }

    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::State(self))
    }

    pub(crate) fn title(&self) -> String {
        format!(
            "{} {}: {}",
            self.scope_type.as_str(),
            self.state_id,
            self.event.as_str()
        )
    }

    pub(crate) fn description(&self) -> String {
        if self.event == StateEventType::Error {
            if let Some(message) = &self.error_message {
                return message.clone();
            }
        }
        match &self.namespace {
            Some(ns) => format!("Scope '{}' in namespace '{ns}'", self.state_id),
            None => format!("Scope '{}'", self.state_id),
        }
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("stateId".into(), json!(self.state_id));
        meta.insert("stateType".into(), json!(self.scope_type.as_str()));
        if let Some(ns) = &self.namespace {
            meta.insert("namespace".into(), json!(ns));
        }
        meta.insert("stateEventType".into(), json!(self.event.as_str()));
        if let Some(args) = &self.args {
            meta.insert("args".into(), args.clone());
        }
        if let Some(state) = &self.initial_state {
            meta.insert("initialState".into(), state.clone());
        }
        if let Some(changes) = &self.changes {
            meta.insert("changes".into(), changes.clone());
        }
        if let Some(state) = &self.previous_state {
            meta.insert("previousState".into(), state.clone());
        }
        if let Some(state) = &self.current_state {
            meta.insert("currentState".into(), state.clone());
        }
        if let Some(state) = &self.final_state {
            meta.insert("finalState".into(), state.clone());
        }
        if let Some(message) = &self.error_message {
            meta.insert("errorMessage".into(), json!(message));
        }
        if let Some(trace) = &self.stack_trace {
            meta.insert("stackTrace".into(), json!(trace));
        }
        meta
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.state_id.to_lowercase().contains(needle)
            || self.scope_type.as_str().contains(needle)
            || self.event.as_str().contains(needle)
            || self
                .namespace
                .as_deref()
                .is_some_and(|ns| ns.to_lowercase().contains(needle))
    }

    /// Exact typed reconstruction. The scope identity (`stateId`,
    /// `stateType`) and `stateEventType` are required; unknown names for
    /// either enum are parse errors, not defaults.
    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "state")?;
        let meta = wire::metadata(obj);
        let scope_raw = wire::required_string(&meta, "stateType")?;
        let scope_type =
            StateScopeType::parse(&scope_raw).ok_or_else(|| EventParseError::InvalidField {
                field: "stateType",
                reason: format!("unknown scope type '{scope_raw}'"),
            })?;
        let event_raw = wire::required_string(&meta, "stateEventType")?;
        let event =
            StateEventType::parse(&event_raw).ok_or_else(|| EventParseError::InvalidField {
                field: "stateEventType",
                reason: format!("unknown state event type '{event_raw}'"),
            })?;
        let log = Self {
            state_id: wire::required_string(&meta, "stateId")?,
            scope_type,
            namespace: wire::opt_string(&meta, "namespace"),
            event,
            args: wire::opt_value(&meta, "args"),
            initial_state: wire::opt_value(&meta, "initialState"),
            changes: wire::opt_value(&meta, "changes"),
            previous_state: wire::opt_value(&meta, "previousState"),
            current_state: wire::opt_value(&meta, "currentState"),
            final_state: wire::opt_value(&meta, "finalState"),
            error_message: wire::opt_string(&meta, "errorMessage"),
            stack_trace: wire::opt_string(&meta, "stackTrace"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::State(log)))
    }
}
