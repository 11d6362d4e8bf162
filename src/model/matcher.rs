// Logic for checking if events match the current filter state.
//
// An event is visible when both hold:
//   1. the active category is `all`, or the event carries that category tag
//   2. the search term is empty, or the lowercased title or description
//      contains it
//
// Everything here is pure. Applying the result to a screen is the job of a
// `Presenter` (see controller.rs).

use crate::model::item::{Category, Event};

/// The two pieces of interaction state driving the listing.
///
/// The search term is normalized on the way in, so comparisons never have
/// to lowercase it again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    category: Category,
    search_term: String,
}

impl FilterState {
    pub fn new(category: Category, search_term: &str) -> Self {
        Self {
            category,
            search_term: normalize_term(search_term),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replaces the active category. Only one is ever active.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_search_term(&mut self, raw: &str) {
        self.search_term = normalize_term(raw);
    }
}

/// Lowercases the raw input value. Whitespace is kept as typed, so
/// "summit " only matches where a space follows "summit".
pub fn normalize_term(raw: &str) -> String {
    raw.to_lowercase()
}

impl Event {
    pub fn matches_category(&self, category: Category) -> bool {
        category == Category::All || self.has_category(category)
    }

    /// `term` must already be normalized.
    pub fn matches_search_term(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
    }
}

/// The visibility predicate.
pub fn matches(event: &Event, state: &FilterState) -> bool {
    event.matches_category(state.category()) && event.matches_search_term(state.search_term())
}

/// Result of a recomputation: one flag per event, in collection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Visibility {
    pub visible: Vec<bool>,
    pub count: usize,
}

impl Visibility {
    /// True when the empty-state message should be shown.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Indices of the visible events, ascending.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
    }
}

pub fn compute_visibility(events: &[Event], state: &FilterState) -> Visibility {
    let visible: Vec<bool> = events.iter().map(|e| matches(e, state)).collect();
    let count = visible.iter().filter(|v| **v).count();
    Visibility { visible, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summit() -> Event {
        Event::new("e1", "Leadership Summit", "A day of talks")
            .with_categories(&["upcoming", "virtual"])
    }

    #[test]
    fn test_state_normalizes_term() {
        let mut state = FilterState::new(Category::Virtual, "SuMMit");
        assert_eq!(state.search_term(), "summit");
        state.set_search_term("VIR");
        assert_eq!(state.search_term(), "vir");
        assert_eq!(state.category(), Category::Virtual);
    }

    #[test]
    fn test_description_match() {
        let ev = summit();
        assert!(ev.matches_search_term("talks"));
        assert!(ev.matches_search_term("leadership"));
        assert!(!ev.matches_search_term("workshop"));
    }

    #[test]
    fn test_category_tag_is_exact() {
        // "in-person" must not match an event tagged "person".
        let ev = Event::new("x", "X", "").with_categories(&["person"]);
        assert!(!ev.matches_category(Category::InPerson));
        assert!(ev.matches_category(Category::All));
    }

    #[test]
    fn test_visible_indices() {
        let events = vec![summit(), Event::new("e2", "Workshop", "")];
        let vis = compute_visibility(&events, &FilterState::new(Category::Virtual, ""));
        assert_eq!(vis.visible_indices().collect::<Vec<_>>(), vec![0]);
        assert!(vis.is_visible(0));
        assert!(!vis.is_visible(1));
        assert!(!vis.is_visible(7));
    }
}
