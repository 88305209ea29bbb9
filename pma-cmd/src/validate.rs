//! Schema validation of local dataset CSVs.

use anyhow::Result;
use pma_dataset::{Dataset, RawTable};
use std::fs;
use std::path::Path;

/// Validate every dataset CSV found in the directory and print a report.
///
/// Missing files and schema violations are reported, not fatal: the point
/// is to show exactly what the chart apps would and would not be able to
/// serve from this directory.
pub fn run_validate(datasets_dir: &Path) -> Result<()> {
    let mut ok = 0usize;
    let mut problems = 0usize;

    for dataset in Dataset::ALL {
        let schema = dataset.schema();
        let path = datasets_dir.join(dataset.file_name());

        let csv_text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                println!("MISSING  {:<30} {}", dataset.file_name(), e);
                problems += 1;
                continue;
            }
        };

        match RawTable::parse(&csv_text, &schema) {
            Ok(table) => {
                let cells: usize = table.rows.iter().map(|r| r.values.len()).sum();
                let gaps: usize = table
                    .rows
                    .iter()
                    .map(|r| r.values.iter().filter(|v| v.is_none()).count())
                    .sum();
                let years = &table.year_columns;
                println!(
                    "OK       {:<30} {} countries, years {}-{}, {} of {} cells empty",
                    dataset.file_name(),
                    table.len(),
                    years.first().unwrap_or(&0),
                    years.last().unwrap_or(&0),
                    gaps,
                    cells,
                );
                ok += 1;
            }
            Err(e) => {
                println!("INVALID  {:<30} {}", dataset.file_name(), e);
                problems += 1;
            }
        }
    }

    println!("\n{ok} dataset(s) valid, {problems} problem(s)");
    Ok(())
}
