//! CSV and geometry ingestion into the store.

use crate::DataStore;
use anyhow::{Context, Result};
use pma_dataset::{Dataset, RawTable, WorldGeometry};

impl DataStore {
    /// Parse one dataset's CSV text and index it.
    ///
    /// Returns the number of country rows ingested. A failed parse leaves
    /// the store unchanged for that dataset; callers treat the dataset as
    /// absent and the views degrade to their "no data" state.
    pub fn load_csv(&self, dataset: Dataset, csv_text: &str) -> Result<usize> {
        let schema = dataset.schema();
        let table = RawTable::parse(csv_text, &schema)
            .with_context(|| format!("failed to parse {}", schema.name))?;
        let rows = table.len();
        if rows == 0 {
            log::warn!("{}: parsed zero usable rows", schema.name);
        }
        let order: Vec<String> = table.rows.iter().map(|r| r.country.clone()).collect();
        let index = table.align();
        log::info!(
            "{}: indexed {} countries across {} years",
            schema.name,
            rows,
            index.year_set().len()
        );
        let mut inner = self.inner.borrow_mut();
        inner.indexes.insert(dataset, index);
        inner.row_order.insert(dataset, order);
        Ok(rows)
    }

    /// Parse and keep the world-geometry document. Returns the feature count.
    pub fn load_geometry(&self, geojson_text: &str) -> Result<usize> {
        let geometry =
            WorldGeometry::parse(geojson_text).context("failed to parse world geometry")?;
        let features = geometry.feature_count();
        log::info!("world geometry: {} features", features);
        self.inner.borrow_mut().geometry = Some(geometry);
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_parse_leaves_the_dataset_absent() {
        let store = DataStore::new();
        let err = store.load_csv(Dataset::Population, "Nation,2010\nNumeria,1\n");
        assert!(err.is_err());
        assert!(!store.has_dataset(Dataset::Population));
    }

    #[test]
    fn successful_load_replaces_prior_data() {
        let store = DataStore::new();
        store
            .load_csv(Dataset::Population, "Country,2010\nNumeria,100\n")
            .unwrap();
        store
            .load_csv(Dataset::Population, "Country,2010\nBorduria,200\n")
            .unwrap();
        let values = store.choropleth(pma_dataset::Metric::Population, 2010);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].country, "Borduria");
    }
}
