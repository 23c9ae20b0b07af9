//! Lifecycle tap for action execution.

use crate::events::ActionLog;

/// Receives one callback per status edge of an action-execution attempt.
///
/// Every callback gets a fully formed [`ActionLog`] already carrying the
/// status; the observer only forwards (or aggregates — e.g. computing
/// `execution_time` from the start/terminal delta for one `event_id`).
///
/// Callback order for one attempt: `pending`, `start`, any number of
/// `progress`, then `complete` — which carries status `completed` or
/// `error` — or `disabled` straight from pending when a guard skips the
/// action. `disabled` is never reached from running.
pub trait ActionObserver: Send + Sync {
    fn on_action_pending(&self, action: &ActionLog);
    fn on_action_start(&self, action: &ActionLog);
    fn on_action_progress(&self, action: &ActionLog);
    fn on_action_complete(&self, action: &ActionLog);
    fn on_action_disabled(&self, action: &ActionLog);
}
