//! Sink-forwarding network observer.

use std::sync::Arc;

use spyglass_core::events::{NetworkErrorLog, NetworkRequestLog, NetworkResponseLog};
use spyglass_core::observers::{
    FailureSnapshot, NetworkObserver, RequestSnapshot, ResponseSnapshot,
};
use spyglass_core::{IEventSink, IIdGenerator, RandomIdGenerator};

use super::forward_to_sink;
use crate::config::InspectorConfig;

/// Taps the interceptor chain and forwards one log per callback.
///
/// Derives the request id for every exchange: an externally supplied
/// correlation id wins, otherwise one is synthesized and (for requests)
/// written back into the snapshot so the client carries it to the
/// response phase. The continuation runs exactly once per callback, even
/// when the event is dropped by config or rejected by the sink.
pub struct ForwardingNetworkObserver {
    sink: Arc<dyn IEventSink>,
    ids: Arc<dyn IIdGenerator>,
    config: InspectorConfig,
}

impl ForwardingNetworkObserver {
    pub fn new(sink: Arc<dyn IEventSink>) -> Self {
        Self {
            sink,
            ids: Arc::new(RandomIdGenerator),
            config: InspectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the id strategy; tests inject a deterministic one.
    pub fn with_id_generator(mut self, ids: Arc<dyn IIdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    fn derive_request_id(&self, supplied: Option<&String>) -> String {
        match supplied {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.ids.event_id(),
        }
    }
}

impl NetworkObserver for ForwardingNetworkObserver {
    fn on_request(&self, request: &mut RequestSnapshot, next: &mut dyn FnMut(&RequestSnapshot)) {
        let request_id = self.derive_request_id(request.correlation_id.as_ref());
        request.correlation_id = Some(request_id.clone());
        let log = NetworkRequestLog {
            request_id,
            method: request.method.clone(),
            url: request.url.clone(),
            headers: request.headers.clone(),
            query_parameters: request.query_parameters.clone(),
            body: if self.config.capture_bodies {
                request.body.clone()
            } else {
                None
            },
            body_size: request.body_size,
            api_name: request.api_name.clone(),
            api_id: request.api_id.clone(),
        };
        let event = log.into_event();
        if self.config.should_log(event.level) {
            forward_to_sink(&self.sink, event);
        }
        next(request);
    }

    fn on_response(&self, response: &ResponseSnapshot, next: &mut dyn FnMut(&ResponseSnapshot)) {
        let log = NetworkResponseLog {
            request_id: self.derive_request_id(response.correlation_id.as_ref()),
            status_code: response.status_code,
            headers: response.headers.clone(),
            body: if self.config.capture_bodies {
                response.body.clone()
            } else {
                None
            },
            response_size: response.response_size,
            duration: response.duration,
            url: response.url.clone(),
        };
        let event = log.into_event();
        if self.config.should_log(event.level) {
            forward_to_sink(&self.sink, event);
        }
        next(response);
    }

    fn on_error(&self, failure: &FailureSnapshot, next: &mut dyn FnMut(&FailureSnapshot)) {
        let log = NetworkErrorLog {
            request_id: self.derive_request_id(failure.correlation_id.as_ref()),
            error: failure.error.clone(),
            stack_trace: failure.stack_trace.clone(),
            failed_url: failure.failed_url.clone(),
            failed_method: failure.failed_method.clone(),
        };
        let event = log.into_event();
        if self.config.should_log(event.level) {
            forward_to_sink(&self.sink, event);
        }
        next(failure);
    }
}
