// File: tests/debounce_search.rs
use eventdeck::config::Config;
use eventdeck::controller::{Board, RecordingPresenter};
use eventdeck::debounce::ManualClock;
use eventdeck::model::{Category, Event};
use eventdeck::store::EventStore;
use std::sync::Arc;
use std::time::Duration;

fn board(clock: &ManualClock) -> Board<RecordingPresenter> {
    let store = EventStore::new(vec![
        Event::new("1", "Leadership Summit", "Talks").with_categories(&["upcoming", "virtual"]),
        Event::new("2", "Workshop", "Hands-on").with_categories(&["past", "in-person"]),
        Event::new("3", "Virtual Coffee", "").with_categories(&["upcoming"]),
    ]);
    Board::new(
        store,
        Arc::new(clock.clone()),
        Duration::from_millis(300),
        RecordingPresenter::default(),
    )
}

#[test]
fn test_burst_yields_single_recompute_with_final_value() {
    let clock = ManualClock::new();
    let mut board = board(&clock);

    board.search_input("v");
    clock.advance_ms(100);
    assert!(board.tick().is_none());
    board.search_input("vi");
    clock.advance_ms(100);
    assert!(board.tick().is_none());
    board.search_input("vir");
    clock.advance_ms(299);
    assert!(board.tick().is_none());
    assert_eq!(board.presenter().recompute_count(), 0);

    clock.advance_ms(1);
    let vis = board.tick().expect("search should fire after the quiet interval");
    assert_eq!(board.presenter().recompute_count(), 1);
    assert_eq!(board.state().search_term(), "vir");
    assert_eq!(vis.visible, vec![false, false, true]);

    clock.advance_ms(1000);
    assert!(board.tick().is_none());
    assert_eq!(board.presenter().recompute_count(), 1);
}

#[test]
fn test_search_term_is_lowercased() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    board.search_input("WORKSHOP");
    clock.advance_ms(300);
    let vis = board.tick().unwrap();
    assert_eq!(board.state().search_term(), "workshop");
    assert_eq!(vis.count, 1);
}

#[test]
fn test_detached_input_never_recomputes() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    board.search_input("summit");
    clock.advance_ms(150);
    board.detach_search_input();
    clock.advance_ms(1000);
    assert!(board.tick().is_none());
    assert!(!board.has_pending_search());
    assert_eq!(board.presenter().recompute_count(), 0);
    assert_eq!(board.state().search_term(), "");
}

#[test]
fn test_category_click_is_immediate() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    let vis = board.select_category(Category::Virtual);
    assert_eq!(vis.count, 1);
    assert_eq!(board.presenter().recompute_count(), 1);

    // Second click replaces the first; only one category is ever active.
    board.select_category(Category::Past);
    assert_eq!(board.state().category(), Category::Past);
    assert_eq!(
        board.presenter().selected,
        vec![Category::Virtual, Category::Past]
    );
    assert_eq!(board.presenter().last().unwrap().visible, vec![false, true, false]);
}

#[test]
fn test_category_click_during_pending_search() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    board.search_input("summit");
    clock.advance_ms(100);

    // Uses the old (empty) term right away.
    let vis = board.select_category(Category::Upcoming);
    assert_eq!(vis.count, 2);
    assert!(board.has_pending_search());

    clock.advance_ms(200);
    let vis = board.tick().unwrap();
    assert_eq!(vis.visible, vec![true, false, false]);
    assert_eq!(board.presenter().recompute_count(), 2);
}

#[test]
fn test_search_remaining_tracks_latest_input() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    assert_eq!(board.search_remaining(), None);
    board.search_input("a");
    clock.advance_ms(250);
    assert_eq!(board.search_remaining(), Some(Duration::from_millis(50)));
    board.search_input("ab");
    assert_eq!(board.search_remaining(), Some(Duration::from_millis(300)));
}

#[test]
fn test_refresh_is_idempotent() {
    let clock = ManualClock::new();
    let mut board = board(&clock);
    board.select_category(Category::Upcoming);
    let a = board.refresh();
    let b = board.refresh();
    assert_eq!(a, b);
}

#[test]
fn test_from_config_uses_configured_interval_and_category() {
    let clock = ManualClock::new();
    let config = Config {
        debounce_ms: 50,
        default_category: Category::InPerson,
        ..Config::default()
    };
    let store = EventStore::new(vec![
        Event::new("1", "Workshop", "").with_categories(&["in-person"]),
        Event::new("2", "Webinar", "").with_categories(&["virtual"]),
    ]);
    let mut board = Board::from_config(
        store,
        Arc::new(clock.clone()),
        &config,
        RecordingPresenter::default(),
    );
    assert_eq!(board.refresh().visible, vec![true, false]);

    board.search_input("web");
    clock.advance_ms(50);
    // In-person filter still applies, so the webinar stays hidden.
    assert_eq!(board.tick().unwrap().count, 0);
}
