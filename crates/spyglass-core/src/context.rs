//! Hierarchy/trigger descriptor stamped onto action and state events:
//! "where in the app this happened".

use serde::{Deserialize, Serialize};

/// Well-known trigger names.
pub mod trigger {
    /// Entering a component is itself a trigger.
    pub const ON_COMPONENT_LOAD: &str = "onComponentLoad";
}

/// Where in the host application an event originated.
///
/// Immutable: every derivation returns a new context and leaves the
/// receiver untouched, so one parent context can safely derive many
/// sibling children concurrently during a UI tree walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityContext {
    /// Path of widget/component markers from the root to the call site.
    #[serde(default)]
    pub widget_hierarchy: Vec<String>,
    /// Page or component owning the current context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_entity_id: Option<String>,
    /// What caused the current work (`onClick`, `onComponentLoad`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,
}

impl ObservabilityContext {
    pub fn new(widget_hierarchy: Vec<String>) -> Self {
        Self {
            widget_hierarchy,
            ..Self::default()
        }
    }

    /// Context rooted at a single marker.
    pub fn root(marker: impl Into<String>) -> Self {
        Self::new(vec![marker.into()])
    }

    /// `[entity_id?] ++ widget_hierarchy` — the path recorded on events.
    pub fn source_chain(&self) -> Vec<String> {
        let mut chain = Vec::with_capacity(self.widget_hierarchy.len() + 1);
        if let Some(entity) = &self.current_entity_id {
            chain.push(entity.clone());
        }
        chain.extend(self.widget_hierarchy.iter().cloned());
        chain
    }

    /// Append markers to the hierarchy.
    pub fn extend_hierarchy<I>(&self, entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut next = self.clone();
        next.widget_hierarchy
            .extend(entries.into_iter().map(Into::into));
        next
    }

    /// Append a component marker. Entering a component is itself a
    /// trigger, so the trigger becomes [`trigger::ON_COMPONENT_LOAD`].
    pub fn for_component(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.widget_hierarchy.push(name.into());
        next.trigger_type = Some(trigger::ON_COMPONENT_LOAD.to_string());
        next
    }

    /// Override the trigger metadata; the hierarchy is untouched.
    pub fn for_trigger(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.trigger_type = Some(name.into());
        next
    }

    /// Set the owning page or component.
    pub fn for_entity(&self, entity_id: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.current_entity_id = Some(entity_id.into());
        next
    }
}
