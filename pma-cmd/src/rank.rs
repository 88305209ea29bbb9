//! Native top-N mortality ranking, using the same store queries the
//! ranked-bar chart app runs in the browser.

use anyhow::Result;
use pma_utils::format;
use std::path::Path;

pub fn run_rank(datasets_dir: &Path, year: i32, count: usize) -> Result<()> {
    let store = crate::summary::load_available(datasets_dir);

    let ranked = store.top_countries(year, count);
    if ranked.is_empty() {
        println!("No derivable mortality rates for {year} (need death_by_pm and population)");
        return Ok(());
    }

    println!("Top {} PM2.5 mortality rates, {}:", ranked.len(), year);
    for entry in &ranked {
        let detail = store.country_detail(&entry.country, year);
        let population = detail
            .population
            .map(format::compact_count)
            .unwrap_or_else(|| "-".to_string());
        let pm25 = detail
            .pm25
            .map(format::micrograms)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>2}. {:<32} {:>10}  (population {}, PM2.5 {})",
            entry.rank,
            entry.country,
            format::death_rate_percent(entry.death_rate),
            population,
            pm25,
        );
    }
    Ok(())
}
