//! Action log variant: one row per action-execution attempt.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::EventParseError;

use super::base::{EventKind, LogEvent};
use super::wire::{self, WireBase};

/// Lifecycle status of an action-execution attempt.
///
/// Machine: `pending → running → {completed, error}`, with any number of
/// progress notifications while running. `disabled` is terminal directly
/// from `pending` — an action skipped by a guard never runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Error,
    Disabled,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Disabled => "disabled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Whether this status ends the lifecycle for its event id.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error | Self::Disabled)
    }

    /// Legal transitions of the status machine. A running action may stay
    /// running across progress notifications.
    pub fn can_transition_to(&self, next: ActionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, ActionStatus::Running)
                | (Self::Pending, ActionStatus::Disabled)
                | (Self::Running, ActionStatus::Running)
                | (Self::Running, ActionStatus::Completed)
                | (Self::Running, ActionStatus::Error)
        )
    }
}

/// One action-execution attempt.
///
/// `action_definition` is the raw configuration as declared;
/// `resolved_parameters` are the evaluated arguments. They are always kept
/// separate, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    /// Id of this attempt; shared by every status callback of one attempt.
    pub event_id: String,
    /// Classifier, e.g. `navigate`, `callRestApi`.
    pub action_type: String,
    pub status: ActionStatus,
    /// None until the attempt reaches a terminal status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<Duration>,
    /// Parent attempt for nested actions. None means top level. Acyclic by
    /// construction — an attempt cannot be its own ancestor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_event_id: Option<String>,
    /// UI/business-logic path that produced this action.
    #[serde(default)]
    pub source_chain: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_name: Option<String>,
    pub action_definition: Value,
    pub resolved_parameters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ActionLog {
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::Action(self))
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_event_id.is_none()
    }

    pub(crate) fn title(&self) -> String {
        format!("{} ({})", self.action_type, self.status.as_str())
    }

    pub(crate) fn description(&self) -> String {
        let mut parts = Vec::new();
        if let Some(trigger) = &self.trigger_name {
            parts.push(format!("triggered by {trigger}"));
        }
        if !self.source_chain.is_empty() {
            parts.push(format!("at {}", self.source_chain.join(" > ")));
        }
        if parts.is_empty() {
            "Action execution".to_string()
        } else {
            format!("Action {}", parts.join(", "))
        }
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("eventId".into(), json!(self.event_id));
        meta.insert("actionType".into(), json!(self.action_type));
        meta.insert("status".into(), json!(self.status.as_str()));
        if let Some(duration) = self.execution_time {
            meta.insert(
                "executionTimeMs".into(),
                json!(duration.as_millis() as u64),
            );
        }
        if let Some(parent) = &self.parent_event_id {
            meta.insert("parentEventId".into(), json!(parent));
        }
        meta.insert("sourceChain".into(), json!(self.source_chain));
        if let Some(trigger) = &self.trigger_name {
            meta.insert("triggerName".into(), json!(trigger));
        }
        // Definition and resolved parameters are both always present.
        meta.insert("actionDefinition".into(), self.action_definition.clone());
        meta.insert(
            "resolvedParameters".into(),
            self.resolved_parameters.clone(),
        );
        if let Some(progress) = &self.progress_data {
            meta.insert("progressData".into(), progress.clone());
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
        self.event_id.to_lowercase().contains(needle)
            || self.action_type.to_lowercase().contains(needle)
            || self.status.as_str().contains(needle)
            || self
                .trigger_name
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(needle))
            || self
                .source_chain
                .iter()
                .any(|s| s.to_lowercase().contains(needle))
    }

    /// Exact typed reconstruction. Requires `eventId`, `actionType`, and a
    /// known `status` — an unknown status name cannot default without
    /// lying about the lifecycle.
    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "action")?;
        let meta = wire::metadata(obj);
        let status_raw = wire::required_string(&meta, "status")?;
        let status =
            ActionStatus::parse(&status_raw).ok_or_else(|| EventParseError::InvalidField {
                field: "status",
                reason: format!("unknown action status '{status_raw}'"),
            })?;
        let log = Self {
            event_id: wire::required_string(&meta, "eventId")?,
            action_type: wire::required_string(&meta, "actionType")?,
            status,
            execution_time: wire::opt_u64(&meta, "executionTimeMs").map(Duration::from_millis),
            parent_event_id: wire::opt_string(&meta, "parentEventId"),
            source_chain: wire::string_vec(&meta, "sourceChain"),
            trigger_name: wire::opt_string(&meta, "triggerName"),
            action_definition: wire::value_or_null(&meta, "actionDefinition"),
            resolved_parameters: wire::value_or_null(&meta, "resolvedParameters"),
            progress_data: wire::opt_value(&meta, "progressData"),
            error_message: wire::opt_string(&meta, "errorMessage"),
            stack_trace: wire::opt_string(&meta, "stackTrace"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::Action(log)))
    }
}
