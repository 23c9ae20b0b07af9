//! Observer contracts: the dispatch surface external subsystems call into.
//!
//! Observers do not store events; they construct or receive log payloads
//! and forward them to a registered sink. Every method is required — the
//! trivial pass-through is the one named [`NoopObserver`] instance.

pub mod action;
pub mod network;
pub mod state;

pub use action::ActionObserver;
pub use network::{FailureSnapshot, NetworkObserver, RequestSnapshot, ResponseSnapshot};
pub use state::StateObserver;

use crate::events::{ActionLog, StateLog};

/// Observer that ignores every callback. Network callbacks still invoke
/// the continuation — the intercepted exchange must proceed even when
/// nobody is watching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NetworkObserver for NoopObserver {
    fn on_request(&self, request: &mut RequestSnapshot, next: &mut dyn FnMut(&RequestSnapshot)) {
        next(request);
    }

    fn on_response(&self, response: &ResponseSnapshot, next: &mut dyn FnMut(&ResponseSnapshot)) {
        next(response);
    }

    fn on_error(&self, failure: &FailureSnapshot, next: &mut dyn FnMut(&FailureSnapshot)) {
        next(failure);
    }
}

impl ActionObserver for NoopObserver {
    fn on_action_pending(&self, _action: &ActionLog) {}
    fn on_action_start(&self, _action: &ActionLog) {}
    fn on_action_progress(&self, _action: &ActionLog) {}
    fn on_action_complete(&self, _action: &ActionLog) {}
    fn on_action_disabled(&self, _action: &ActionLog) {}
}

impl StateObserver for NoopObserver {
    fn on_create(&self, _state: &StateLog) {}
    fn on_change(&self, _state: &StateLog) {}
    fn on_dispose(&self, _state: &StateLog) {}
    fn on_error(&self, _state: &StateLog) {}
}
