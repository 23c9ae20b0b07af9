//! Lifecycle tap for state scopes.

use crate::events::StateLog;

/// Receives one callback per lifecycle event of a state scope, keyed by
/// `(state_id, scope_type, namespace)`.
///
/// Callbacks are pure notifications — the observer has no obligation to
/// retain history. A sink that wants delta/snapshot consistency must
/// track the last snapshot per scope identity itself, keying on the full
/// triple: the namespace is what separates two concurrent instances of
/// the same `(state_id, scope_type)`.
pub trait StateObserver: Send + Sync {
    fn on_create(&self, state: &StateLog);
    fn on_change(&self, state: &StateLog);
    fn on_dispose(&self, state: &StateLog);
    fn on_error(&self, state: &StateLog);
}
