//! Per-scope snapshot tracking for delta/snapshot consistency.

use dashmap::DashMap;
use serde_json::{Map, Value};
use spyglass_core::events::{StateLog, StateScopeType};

/// Identity of one scope instance. The namespace is part of the key: two
/// pages of the same type on a navigation stack differ only by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    pub state_id: String,
    pub scope_type: StateScopeType,
    pub namespace: Option<String>,
}

impl ScopeKey {
    pub fn new(
        state_id: impl Into<String>,
        scope_type: StateScopeType,
        namespace: Option<String>,
    ) -> Self {
        Self {
            state_id: state_id.into(),
            scope_type,
            namespace,
        }
    }

    /// The identity triple recorded on a state log.
    pub fn of(state: &StateLog) -> Self {
        Self {
            state_id: state.state_id.clone(),
            scope_type: state.scope_type,
            namespace: state.namespace.clone(),
        }
    }
}

/// Lifecycle phase of a tracked scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePhase {
    Created,
    Disposed,
}

#[derive(Debug)]
struct ScopeRecord {
    phase: ScopePhase,
    snapshot: Option<Value>,
}

/// Tracks the last known full snapshot per scope identity, so change
/// events that only carry a delta can be enriched with
/// `previous_state`/`current_state`.
///
/// The tracker is total: out-of-order traffic (a change before any
/// create) is still recorded — ordering is the caller's invariant — but
/// flagged at debug level.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    scopes: DashMap<ScopeKey, ScopeRecord>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a scope. A create on a disposed or already-known identity is
    /// a fresh instance and replaces the old record entirely.
    pub fn on_create(&self, key: &ScopeKey, initial: Option<Value>) {
        self.scopes.insert(
            key.clone(),
            ScopeRecord {
                phase: ScopePhase::Created,
                snapshot: initial,
            },
        );
    }

    /// Apply a change and return `(previous, current)` full snapshots.
    ///
    /// When the caller supplies a full `current` snapshot it wins; when it
    /// only supplies a delta, the new snapshot is a shallow merge of the
    /// delta over the last one. Non-object deltas replace the snapshot
    /// wholesale.
    pub fn apply_change(
        &self,
        key: &ScopeKey,
        changes: Option<Value>,
        current: Option<Value>,
    ) -> (Option<Value>, Option<Value>) {
        let mut entry = self.scopes.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(state_id = %key.state_id, "change for untracked scope");
            ScopeRecord {
                phase: ScopePhase::Created,
                snapshot: None,
            }
        });
        let previous = entry.snapshot.clone();
        let next = match current {
            Some(full) => Some(full),
            None => changes.map(|delta| merge_shallow(previous.as_ref(), delta)),
        };
        if next.is_some() {
            entry.snapshot = next.clone();
        }
        (previous, next)
    }

    /// End a scope and return its last snapshot.
    pub fn on_dispose(&self, key: &ScopeKey) -> Option<Value> {
        match self.scopes.get_mut(key) {
            Some(mut record) => {
                record.phase = ScopePhase::Disposed;
                record.snapshot.clone()
            }
            None => {
                tracing::debug!(state_id = %key.state_id, "dispose for untracked scope");
                None
            }
        }
    }

    /// Last known full snapshot for a scope identity.
    pub fn snapshot(&self, key: &ScopeKey) -> Option<Value> {
        self.scopes.get(key).and_then(|r| r.snapshot.clone())
    }

    /// Whether the scope has been created and not yet disposed.
    pub fn is_live(&self, key: &ScopeKey) -> bool {
        self.scopes
            .get(key)
            .is_some_and(|r| r.phase == ScopePhase::Created)
    }

    /// Number of identities ever tracked and not replaced.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

fn merge_shallow(base: Option<&Value>, delta: Value) -> Value {
    let mut merged = match base {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    match delta {
        Value::Object(fields) => {
            for (k, v) in fields {
                merged.insert(k, v);
            }
            Value::Object(merged)
        }
        other => other,
    }
}
