//! Interceptor-chain tap for HTTP traffic.
//!
//! The snapshot structs are the protocol-facing description of an
//! exchange: the HTTP client adapts its own request/response types into
//! them and never depends on the event model. The client registers the
//! observer as an interceptor; the observer is a pure side channel.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An outgoing request as seen by the interceptor chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// Externally supplied correlation id. `on_request` writes a
    /// synthesized one back here when absent, so the client carries it
    /// through to the response phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
}

/// A completed response as seen by the interceptor chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An exchange that failed before producing a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_method: Option<String>,
}

/// Side-channel tap over an HTTP interceptor chain.
///
/// Each callback must invoke `next` exactly once and must not block or
/// alter the exchange: the intercepted request completes identically
/// whether or not an inspector is attached. `on_request` derives the
/// request id — it takes the supplied correlation id when present, else
/// synthesizes one and writes it back into the snapshot.
pub trait NetworkObserver: Send + Sync {
    fn on_request(&self, request: &mut RequestSnapshot, next: &mut dyn FnMut(&RequestSnapshot));
    fn on_response(&self, response: &ResponseSnapshot, next: &mut dyn FnMut(&ResponseSnapshot));
    fn on_error(&self, failure: &FailureSnapshot, next: &mut dyn FnMut(&FailureSnapshot));
}
