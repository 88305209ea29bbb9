//! Coverage summary across the local datasets.

use anyhow::Result;
use log::info;
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;
use std::fs;
use std::path::Path;

/// Load whatever datasets exist in the directory into a store and print
/// per-metric year coverage plus the cross-dataset intersection.
pub fn run_summary(datasets_dir: &Path) -> Result<()> {
    let store = load_available(datasets_dir);

    if store.loaded_datasets().is_empty() {
        println!("No datasets could be loaded from {}", datasets_dir.display());
        return Ok(());
    }

    println!("Loaded datasets:");
    for dataset in store.loaded_datasets() {
        println!("  - {}", dataset.file_name());
    }

    println!("\nPer-metric common years:");
    for metric in Metric::ALL {
        let years = store.common_years(metric);
        match (years.first(), years.last()) {
            (Some(first), Some(last)) => println!(
                "  {:<28} {} years ({first}-{last})",
                metric.label(),
                years.len(),
            ),
            _ => println!("  {:<28} no renderable range", metric.label()),
        }
    }

    Ok(())
}

/// Load every dataset file present in the directory, skipping the rest.
pub fn load_available(datasets_dir: &Path) -> DataStore {
    let store = DataStore::new();
    for dataset in Dataset::ALL {
        let path = datasets_dir.join(dataset.file_name());
        match fs::read_to_string(&path) {
            Ok(csv_text) => {
                if let Err(e) = store.load_csv(dataset, &csv_text) {
                    info!("{}: {}", dataset.file_name(), e);
                }
            }
            Err(_) => info!("{} not present, skipping", dataset.file_name()),
        }
    }
    store
}
