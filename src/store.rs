// File: src/store.rs
use crate::model::{Event, FilterState, Visibility, compute_visibility};
use std::collections::HashMap;

/// The fixed, order-preserving collection of events shown on the page.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    index: HashMap<String, usize>,
}

impl EventStore {
    pub fn new(events: Vec<Event>) -> Self {
        let mut index = HashMap::new();
        for (i, ev) in events.iter().enumerate() {
            if ev.id.is_empty() {
                continue;
            }
            // First occurrence wins, like a DOM id lookup.
            index.entry(ev.id.clone()).or_insert(i);
        }
        Self { events, index }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.index.get(id).and_then(|&i| self.events.get(i))
    }

    pub fn visibility(&self, state: &FilterState) -> Visibility {
        compute_visibility(&self.events, state)
    }

    /// Visible events in their original order.
    pub fn filter(&self, state: &FilterState) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| crate::model::matches(e, state))
            .collect()
    }
}
