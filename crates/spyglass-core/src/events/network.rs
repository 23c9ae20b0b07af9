//! Network log variants. Request, response, and error referencing the
//! same `request_id` are one logical HTTP exchange.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::EventParseError;

use super::base::{EventKind, LogEvent};
use super::wire::{self, WireBase};

/// One intercepted HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequestLog {
    /// Correlation id shared with the matching response or error.
    pub request_id: String,
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub query_parameters: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_size: Option<u64>,
    /// Name of the declared API definition this request was issued from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
}

impl NetworkRequestLog {
    /// Wrap into a full event with generated id and implied severity.
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::NetworkRequest(self))
    }

    pub(crate) fn title(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    pub(crate) fn description(&self) -> String {
        match &self.api_name {
            Some(name) => format!("Request issued via API '{name}'"),
            None => "Outgoing HTTP request".to_string(),
        }
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("requestId".into(), json!(self.request_id));
        meta.insert("method".into(), json!(self.method));
        meta.insert("url".into(), json!(self.url));
        meta.insert("headers".into(), json!(self.headers));
        meta.insert("queryParameters".into(), json!(self.query_parameters));
        if let Some(body) = &self.body {
            meta.insert("body".into(), body.clone());
        }
        if let Some(size) = self.body_size {
            meta.insert("bodySize".into(), json!(size));
        }
        if let Some(name) = &self.api_name {
            meta.insert("apiName".into(), json!(name));
        }
        if let Some(id) = &self.api_id {
            meta.insert("apiId".into(), json!(id));
        }
        meta
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.request_id.to_lowercase().contains(needle)
            || self.method.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
            || self
                .api_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }

    /// Exact typed reconstruction from the wire shape. `requestId` is the
    /// only genuinely required field; everything else defaults.
    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "network_request")?;
        let meta = wire::metadata(obj);
        let log = Self {
            request_id: wire::required_string(&meta, "requestId")?,
            method: wire::opt_string(&meta, "method").unwrap_or_default(),
            url: wire::opt_string(&meta, "url").unwrap_or_default(),
            headers: wire::string_map(&meta, "headers"),
            query_parameters: wire::string_map(&meta, "queryParameters"),
            body: wire::opt_value(&meta, "body"),
            body_size: wire::opt_u64(&meta, "bodySize"),
            api_name: wire::opt_string(&meta, "apiName"),
            api_id: wire::opt_string(&meta, "apiId"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::NetworkRequest(log)))
    }
}

/// The response half of an exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponseLog {
    /// Correlation id shared with the request.
    pub request_id: String,
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_size: Option<u64>,
    /// Wall time of the exchange as measured by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NetworkResponseLog {
    /// Wrap into a full event; severity derives from the status code.
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::NetworkResponse(self))
    }

    /// `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// `[400, 500)`.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// `[500, 600)`. Statuses outside `[200, 600)` satisfy no predicate.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    pub(crate) fn title(&self) -> String {
        match &self.url {
            Some(url) => format!("{} {}", self.status_code, url),
            None => format!("HTTP {}", self.status_code),
        }
    }

    pub(crate) fn description(&self) -> String {
        let outcome = if self.is_success() {
            "succeeded"
        } else if self.is_client_error() {
            "failed (client error)"
        } else if self.is_server_error() {
            "failed (server error)"
        } else {
            "completed"
        };
        match self.duration {
            Some(d) => format!("Exchange {outcome} in {}ms", d.as_millis()),
            None => format!("Exchange {outcome}"),
        }
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("requestId".into(), json!(self.request_id));
        meta.insert("statusCode".into(), json!(self.status_code));
        meta.insert("headers".into(), json!(self.headers));
        if let Some(body) = &self.body {
            meta.insert("body".into(), body.clone());
        }
        if let Some(size) = self.response_size {
            meta.insert("responseSize".into(), json!(size));
        }
        if let Some(duration) = self.duration {
            meta.insert("durationMs".into(), json!(duration.as_millis() as u64));
        }
        if let Some(url) = &self.url {
            meta.insert("url".into(), json!(url));
        }
        meta
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.request_id.to_lowercase().contains(needle)
            || self.status_code.to_string().contains(needle)
            || self
                .url
                .as_deref()
                .is_some_and(|u| u.to_lowercase().contains(needle))
    }

    /// Exact typed reconstruction. Requires `requestId` and a numeric
    /// `statusCode` — a malformed status cannot be defaulted without
    /// substituting wrong data.
    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "network_response")?;
        let meta = wire::metadata(obj);
        let status = meta
            .get("statusCode")
            .ok_or(EventParseError::MissingField {
                field: "statusCode",
            })?;
        let status_code = status
            .as_u64()
            .and_then(|s| u16::try_from(s).ok())
            .ok_or_else(|| EventParseError::InvalidField {
                field: "statusCode",
                reason: format!("expected a status code, got {status}"),
            })?;
        let log = Self {
            request_id: wire::required_string(&meta, "requestId")?,
            status_code,
            headers: wire::string_map(&meta, "headers"),
            body: wire::opt_value(&meta, "body"),
            response_size: wire::opt_u64(&meta, "responseSize"),
            duration: wire::opt_u64(&meta, "durationMs").map(Duration::from_millis),
            url: wire::opt_string(&meta, "url"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::NetworkResponse(log)))
    }
}

/// The failure half of an exchange that never produced a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkErrorLog {
    /// Correlation id shared with the request.
    pub request_id: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_method: Option<String>,
}

impl NetworkErrorLog {
    pub fn into_event(self) -> LogEvent {
        LogEvent::new(EventKind::NetworkError(self))
    }

    pub(crate) fn title(&self) -> String {
        match (&self.failed_method, &self.failed_url) {
            (Some(method), Some(url)) => format!("Failed {method} {url}"),
            (None, Some(url)) => format!("Failed request to {url}"),
            _ => "Network error".to_string(),
        }
    }

    pub(crate) fn description(&self) -> String {
        self.error.clone()
    }

    pub(crate) fn metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("requestId".into(), json!(self.request_id));
        meta.insert("error".into(), json!(self.error));
        if let Some(trace) = &self.stack_trace {
            meta.insert("stackTrace".into(), json!(trace));
        }
        if let Some(url) = &self.failed_url {
            meta.insert("failedUrl".into(), json!(url));
        }
        if let Some(method) = &self.failed_method {
            meta.insert("failedMethod".into(), json!(method));
        }
        meta
    }

    pub(crate) fn matches_extra(&self, needle: &str) -> bool {
        self.request_id.to_lowercase().contains(needle)
            || self.error.to_lowercase().contains(needle)
            || self
                .failed_url
                .as_deref()
                .is_some_and(|u| u.to_lowercase().contains(needle))
            || self
                .failed_method
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(needle))
    }

    pub fn from_json(value: &Value) -> Result<LogEvent, EventParseError> {
        let obj = wire::object(value)?;
        wire::expect_event_type(obj, "network_error")?;
        let meta = wire::metadata(obj);
        let log = Self {
            request_id: wire::required_string(&meta, "requestId")?,
            error: wire::opt_string(&meta, "error").unwrap_or_default(),
            stack_trace: wire::opt_string(&meta, "stackTrace"),
            failed_url: wire::opt_string(&meta, "failedUrl"),
            failed_method: wire::opt_string(&meta, "failedMethod"),
        };
        Ok(WireBase::parse(obj)?.into_event(EventKind::NetworkError(log)))
    }
}
