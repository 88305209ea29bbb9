//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided
//! via `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`.

use dioxus::prelude::*;
use pma_data::{ChartPhase, SelectionContext};
use pma_store::DataStore;

/// Monotonic stamp for load cycles.
///
/// Every dataset-changing input begins a new generation; an async load
/// that finishes after a newer generation began must not commit its
/// results. This is what guarantees last-selection-wins when the user
/// flips inputs faster than fetches resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    /// Start a new load cycle, returning its stamp.
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Whether a stamp still identifies the newest cycle.
    pub fn is_current(&self, stamp: u64) -> bool {
        self.current == stamp
    }
}

/// Shared application state for all PMA chart apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Loaded dataset store (None until the initial load resolves)
    pub store: Signal<Option<DataStore>>,
    /// Whether a load cycle is in flight
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// The user's current year/metric/country choice
    pub selection: Signal<SelectionContext>,
    /// Where the chart is in its Loading/Empty/Ready lifecycle
    pub phase: Signal<ChartPhase>,
    generation: Signal<GenerationCounter>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            store: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            selection: Signal::new(SelectionContext::default()),
            phase: Signal::new(ChartPhase::default()),
            generation: Signal::new(GenerationCounter::default()),
        }
    }

    /// Mark the start of a load cycle and return its stamp.
    pub fn begin_load(&mut self) -> u64 {
        self.loading.set(true);
        self.phase.write().on_input_change();
        self.generation.write().begin()
    }

    /// Record whether the current selection produced anything to plot.
    /// Called by the render effect once the queries have run.
    pub fn mark_rendered(&mut self, has_data: bool) {
        self.phase.write().on_load_finished(has_data);
    }

    /// Whether a stamp taken at `begin_load` is still the newest cycle.
    /// A stale load must drop its results instead of committing them.
    pub fn is_current(&self, stamp: u64) -> bool {
        self.generation.peek().is_current(stamp)
    }

    /// Finish a load cycle if it is still current. Returns false when the
    /// results belong to a superseded selection and were discarded.
    pub fn finish_load(&mut self, stamp: u64, error: Option<String>) -> bool {
        if !self.is_current(stamp) {
            log::info!("discarding results of superseded load cycle {stamp}");
            return false;
        }
        self.error_msg.set(error);
        self.loading.set(false);
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::GenerationCounter;

    #[test]
    fn newest_generation_wins() {
        let mut counter = GenerationCounter::default();
        let first = counter.begin();
        assert!(counter.is_current(first));

        // A second load starts before the first resolves.
        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn stamps_are_strictly_increasing() {
        let mut counter = GenerationCounter::default();
        let a = counter.begin();
        let b = counter.begin();
        let c = counter.begin();
        assert!(a < b && b < c);
    }
}
