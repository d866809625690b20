//! Listener directory: event name → (listener name → address).
//!
//! Plain data with no locking of its own. The registry actor is the only
//! owner, so every access is already serialized.

use std::collections::HashMap;

/// Registration state for every known event.
///
/// Event keys are created on first registration and never pruned, so an event
/// whose listeners were all discarded still [`exists`](Self::exists).
#[derive(Debug, Default, Clone)]
pub struct ListenerDirectory {
    events: HashMap<String, HashMap<String, String>>,
}

impl ListenerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name → address` under `event`.
    pub fn upsert(&mut self, event: &str, name: &str, address: &str) {
        self.events
            .entry(event.to_string())
            .or_default()
            .insert(name.to_string(), address.to_string());
    }

    /// Remove `name` from every event it is registered under.
    pub fn remove_by_name(&mut self, name: &str) {
        for listeners in self.events.values_mut() {
            listeners.remove(name);
        }
    }

    /// Snapshot of `(name, address)` pairs for `event`, in no particular order.
    pub fn listeners_for(&self, event: &str) -> Vec<(String, String)> {
        self.events
            .get(event)
            .map(|listeners| {
                listeners
                    .iter()
                    .map(|(name, address)| (name.clone(), address.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn exists(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Number of event keys, including emptied ones.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Total listeners across all events.
    pub fn listener_count(&self) -> usize {
        self.events.values().map(HashMap::len).sum()
    }
}
