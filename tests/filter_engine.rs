// File: tests/filter_engine.rs
use eventdeck::model::{Category, Event, FilterState, compute_visibility, matches};
use eventdeck::storage::default_catalog;
use eventdeck::store::EventStore;
use strum::IntoEnumIterator;

fn scenario_events() -> Vec<Event> {
    vec![
        Event::new("1", "Leadership Summit", "").with_categories(&["upcoming", "virtual"]),
        Event::new("2", "Workshop", "").with_categories(&["past", "in-person"]),
    ]
}

fn titles(store: &EventStore, state: &FilterState) -> Vec<String> {
    store.filter(state).iter().map(|e| e.title.clone()).collect()
}

fn sample_terms() -> Vec<&'static str> {
    vec!["", "summit", "SUMMIT", "shop", "network", "virtual", "zzz", " ", "leadership "]
}

#[test]
fn test_scenario_virtual_category() {
    let store = EventStore::new(scenario_events());
    let state = FilterState::new(Category::Virtual, "");
    assert_eq!(titles(&store, &state), vec!["Leadership Summit"]);
    assert_eq!(store.visibility(&state).count, 1);
}

#[test]
fn test_scenario_search_all() {
    let store = EventStore::new(scenario_events());
    let state = FilterState::new(Category::All, "workshop");
    assert_eq!(titles(&store, &state), vec!["Workshop"]);
    assert_eq!(store.visibility(&state).count, 1);
}

#[test]
fn test_scenario_empty_result() {
    let store = EventStore::new(scenario_events());
    let state = FilterState::new(Category::Past, "summit");
    let vis = store.visibility(&state);
    assert!(titles(&store, &state).is_empty());
    assert_eq!(vis.count, 0);
    assert!(vis.is_empty());
}

#[test]
fn test_all_and_empty_term_shows_everything() {
    let events = default_catalog();
    let vis = compute_visibility(&events, &FilterState::default());
    assert_eq!(vis.count, events.len());
    assert!(vis.visible.iter().all(|v| *v));
}

#[test]
fn test_category_excludes_regardless_of_term() {
    let mut events = default_catalog();
    events.extend(scenario_events());
    for cat in Category::iter().filter(|c| *c != Category::All) {
        for term in sample_terms() {
            let state = FilterState::new(cat, term);
            for ev in &events {
                if !ev.has_category(cat) {
                    assert!(
                        !matches(ev, &state),
                        "{} visible under {} / '{}'",
                        ev.title,
                        cat,
                        term
                    );
                }
            }
        }
    }
}

#[test]
fn test_search_requires_case_insensitive_substring() {
    let mut events = default_catalog();
    events.extend(scenario_events());
    for term in sample_terms().into_iter().filter(|t| !t.is_empty()) {
        let state = FilterState::new(Category::All, term);
        let needle = term.to_lowercase();
        for ev in &events {
            let expected = ev.title.to_lowercase().contains(&needle)
                || ev.description.to_lowercase().contains(&needle);
            assert_eq!(matches(ev, &state), expected, "{} / '{}'", ev.title, term);
        }
    }
}

#[test]
fn test_search_matches_description() {
    let events = vec![Event::new("x", "Quarterly Meetup", "Hosted on Zoom for remote staff")];
    let vis = compute_visibility(&events, &FilterState::new(Category::All, "zoom"));
    assert_eq!(vis.count, 1);
}

#[test]
fn test_recompute_is_idempotent() {
    let store = EventStore::new(default_catalog());
    let state = FilterState::new(Category::Upcoming, "session");
    let first = store.visibility(&state);
    let second = store.visibility(&state);
    assert_eq!(first, second);
    assert_eq!(first.count, 1);
}

#[test]
fn test_order_preserved() {
    let store = EventStore::new(default_catalog());
    let ids: Vec<&str> = store
        .filter(&FilterState::new(Category::Virtual, ""))
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["event-1", "event-3"]);
}

#[test]
fn test_event_without_categories_only_under_all() {
    let events = vec![Event::new("bare", "Open House", "")];
    for cat in Category::iter() {
        let vis = compute_visibility(&events, &FilterState::new(cat, ""));
        assert_eq!(vis.count == 1, cat == Category::All, "{}", cat);
    }
}
