// File: src/controller.rs
//! Glue between user actions and the filter engine.
//! All front ends (the CLI list/watch commands, tests) drive the listing through
//! `Board`, so category clicks and debounced search input behave the same way
//! everywhere. Rendering is delegated to a `Presenter`.
use crate::config::Config;
use crate::debounce::{Debouncer, SharedClock};
use crate::model::{Category, Event, FilterState, Visibility};
use crate::store::EventStore;
use std::time::Duration;

/// Applies a computed visibility to whatever displays the events.
pub trait Presenter {
    /// Called after every recomputation. `events` is the full collection in
    /// order; `visibility` says which of them to show.
    fn apply(&mut self, events: &[Event], visibility: &Visibility);

    /// Called when a category button becomes the active one.
    fn category_selected(&mut self, _category: Category) {}
}

/// Presenter that keeps every update. Used by tests and by callers that want
/// to inspect the last result without rendering.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub updates: Vec<Visibility>,
    pub selected: Vec<Category>,
}

impl RecordingPresenter {
    pub fn last(&self) -> Option<&Visibility> {
        self.updates.last()
    }

    pub fn recompute_count(&self) -> usize {
        self.updates.len()
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, _events: &[Event], visibility: &Visibility) {
        self.updates.push(visibility.clone());
    }

    fn category_selected(&mut self, category: Category) {
        self.selected.push(category);
    }
}

pub struct Board<P: Presenter> {
    store: EventStore,
    state: FilterState,
    search: Debouncer<String>,
    presenter: P,
}

impl<P: Presenter> Board<P> {
    pub fn new(store: EventStore, clock: SharedClock, quiet: Duration, presenter: P) -> Self {
        Self {
            store,
            state: FilterState::default(),
            search: Debouncer::new(clock, quiet),
            presenter,
        }
    }

    /// Builds a board with the configured quiet interval and start category.
    pub fn from_config(store: EventStore, clock: SharedClock, config: &Config, presenter: P) -> Self {
        let mut board = Self::new(store, clock, config.debounce_interval(), presenter);
        board.state.set_category(config.default_category);
        board
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Deadline of the pending search, for event loops that sleep until it.
    pub fn search_remaining(&self) -> Option<Duration> {
        self.search.remaining()
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Category button click: replaces the active category and recomputes
    /// right away.
    pub fn select_category(&mut self, category: Category) -> Visibility {
        log::debug!("Category selected: {}", category);
        self.state.set_category(category);
        self.presenter.category_selected(category);
        self.recompute()
    }

    /// Text input changed. The recomputation is deferred until the input has
    /// been quiet for the configured interval.
    pub fn search_input(&mut self, raw: &str) {
        self.search.push(raw.to_string());
    }

    /// Runs the deferred search if it is due. Returns the new visibility when
    /// a recomputation happened.
    pub fn tick(&mut self) -> Option<Visibility> {
        let raw = self.search.poll()?;
        self.state.set_search_term(&raw);
        log::debug!("Search term applied: '{}'", self.state.search_term());
        Some(self.recompute())
    }

    /// The search input went away; whatever it typed last is dropped.
    pub fn detach_search_input(&mut self) {
        if self.search.cancel() {
            log::debug!("Search input detached, pending search dropped");
        }
    }

    /// Recomputes with the current state. Also used for the initial render.
    pub fn refresh(&mut self) -> Visibility {
        self.recompute()
    }

    fn recompute(&mut self) -> Visibility {
        let visibility = self.store.visibility(&self.state);
        log::info!(
            "Filter '{}' / '{}': {} of {} events visible",
            self.state.category(),
            self.state.search_term(),
            visibility.count,
            self.store.len()
        );
        self.presenter.apply(self.store.events(), &visibility);
        visibility
    }
}
