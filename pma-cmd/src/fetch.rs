//! Download the upstream source datasets.
//!
//! OWID grapher exports arrive in long format (`Entity,Code,Year,value`)
//! and are pivoted into the country-by-year layout the charts consume.
//! Other sources are saved as-is under `raw/` for manual reshaping.

use anyhow::{Context, Result};
use chrono::Utc;
use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use pma_dataset::Dataset;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Run a full download of every source dataset.
///
/// Individual download failures are logged and skipped; the command only
/// fails on local I/O errors. A `FETCHED.txt` manifest records what was
/// downloaded when, and from where.
pub async fn run_fetch(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;
    let raw_dir = out_dir.join("raw");
    fs::create_dir_all(&raw_dir)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    let mut manifest = String::new();

    for dataset in Dataset::ALL {
        let url = dataset.source_url();
        let file_name = dataset.file_name();
        info!("Fetching {} from {}", file_name, url);

        let response = match client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                info!("Failed to fetch {}: {}", file_name, e);
                continue;
            }
        };
        if !response.status().is_success() {
            info!("Bad response for {}: {}", file_name, response.status());
            continue;
        }
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                info!("Failed to read body for {}: {}", file_name, e);
                continue;
            }
        };

        let target = match pivot_owid_long(&body) {
            Some(wide_csv) => {
                let path = out_dir.join(file_name);
                fs::write(&path, wide_csv)?;
                path
            }
            None => {
                // Not the long layout; keep the raw export for manual reshaping.
                let path = raw_dir.join(file_name);
                fs::write(&path, &body)?;
                path
            }
        };
        info!("Wrote {}", target.display());
        manifest.push_str(&format!("{}\t{}\t{}\n", Utc::now().to_rfc3339(), file_name, url));
    }

    fs::write(out_dir.join("FETCHED.txt"), manifest)?;
    Ok(())
}

/// Pivot an OWID-style long CSV (`Entity,Code,Year,value`) into the wide
/// `Country,<year>,...` layout. Returns `None` when the header does not
/// match the long layout.
fn pivot_owid_long(csv_text: &str) -> Option<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = rdr.headers().ok()?.clone();
    let entity_idx = headers.iter().position(|h| h == "Entity")?;
    let year_idx = headers.iter().position(|h| h == "Year")?;
    // The value column is the last one that is neither Entity, Code nor Year.
    let value_idx = (0..headers.len())
        .rev()
        .find(|&i| i != entity_idx && i != year_idx && headers.get(i) != Some("Code"))?;

    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut by_country: BTreeMap<String, BTreeMap<i32, String>> = BTreeMap::new();

    for record in rdr.records().flatten() {
        let country = record.get(entity_idx).unwrap_or("").trim();
        let year: i32 = match record.get(year_idx).unwrap_or("").trim().parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let value = record.get(value_idx).unwrap_or("").trim();
        if country.is_empty() || value.is_empty() {
            continue;
        }
        years.insert(year);
        by_country
            .entry(country.to_string())
            .or_default()
            .insert(year, value.to_string());
    }

    if years.is_empty() {
        return None;
    }

    let mut wtr = WriterBuilder::new().from_writer(Vec::new());
    let mut header: Vec<String> = vec!["Country".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    wtr.write_record(&header).ok()?;

    for (country, values) in &by_country {
        let mut row: Vec<String> = vec![country.clone()];
        row.extend(years.iter().map(|y| values.get(y).cloned().unwrap_or_default()));
        wtr.write_record(&row).ok()?;
    }

    String::from_utf8(wtr.into_inner().ok()?).ok()
}

#[cfg(test)]
mod tests {
    use super::pivot_owid_long;

    #[test]
    fn pivots_long_format_to_country_by_year() {
        let long = "Entity,Code,Year,Deaths\nNumeria,NUM,2010,50\nNumeria,NUM,2011,55\nBorduria,BOR,2010,8\n";
        let wide = pivot_owid_long(long).unwrap();
        let mut lines = wide.lines();
        assert_eq!(lines.next().unwrap(), "Country,2010,2011");
        assert_eq!(lines.next().unwrap(), "Borduria,8,");
        assert_eq!(lines.next().unwrap(), "Numeria,50,55");
    }

    #[test]
    fn non_long_layouts_are_left_alone() {
        assert!(pivot_owid_long("Country,2010\nNumeria,1\n").is_none());
        assert!(pivot_owid_long("not,a,long,file\n1,2,3,4\n").is_none());
    }
}
