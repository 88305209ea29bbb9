//! In-memory store over the aligned datasets, with typed chart queries.
//!
//! This crate is the single data source behind every chart app and the
//! native CLI. CSV text goes in through the `load_*` methods, and typed,
//! serializable chart models come out through the query methods in
//! [`queries`]; the apps never touch a [`pma_dataset::YearIndex`]
//! directly.
//!
//! # Usage
//!
//! ```rust
//! use pma_dataset::{Dataset, Metric};
//! use pma_store::DataStore;
//!
//! let store = DataStore::new();
//! store
//!     .load_csv(Dataset::Pm25Exposure, "Country,2019,2020\nNumeria,12.5,11.0\n")
//!     .unwrap();
//!
//! assert_eq!(store.common_years(Metric::Pm25), vec![2019, 2020]);
//! let map = store.choropleth(Metric::Pm25, 2020);
//! assert_eq!(map[0].country, "Numeria");
//! ```

pub mod models;
mod loader;
mod queries;

use pma_dataset::{Dataset, WorldGeometry, YearIndex};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Cheaply cloneable handle over the loaded datasets.
///
/// All chart apps run single-threaded in WASM, so an `Rc<RefCell<_>>` is
/// the whole concurrency story: loads mutate, queries borrow read-only,
/// and nothing is ever mutated in place after ingestion.
#[derive(Clone, Default)]
pub struct DataStore {
    inner: Rc<RefCell<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    indexes: HashMap<Dataset, YearIndex>,
    /// Country order as it appeared in each source CSV. Ranking queries
    /// iterate in this order so stable sorts break ties by source row.
    row_order: HashMap<Dataset, Vec<String>>,
    geometry: Option<WorldGeometry>,
}

impl DataStore {
    /// Create an empty store; populate it with the `load_*` methods.
    pub fn new() -> Self {
        DataStore::default()
    }

    pub fn has_dataset(&self, dataset: Dataset) -> bool {
        self.inner.borrow().indexes.contains_key(&dataset)
    }

    pub fn has_geometry(&self) -> bool {
        self.inner.borrow().geometry.is_some()
    }

    /// Datasets successfully loaded so far, in [`Dataset::ALL`] order.
    pub fn loaded_datasets(&self) -> Vec<Dataset> {
        let inner = self.inner.borrow();
        Dataset::ALL
            .into_iter()
            .filter(|d| inner.indexes.contains_key(d))
            .collect()
    }
}
