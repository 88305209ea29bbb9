//! Query result models.
//!
//! Everything here derives `Serialize` so it can be handed to D3.js as
//! JSON from the WASM apps. Missing values serialize as `null`; the chart
//! JS treats `null` as "no data", never as zero.

use pma_data::{RangeBucket, TrendPoint};
use serde::Serialize;

/// A `(country, value)` pair for the choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryValue {
    pub country: String,
    pub value: f64,
}

/// Every metric the tooltip can show for one `(country, year)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDetail {
    pub country: String,
    pub year: i32,
    pub pm25: Option<f64>,
    pub population: Option<f64>,
    pub death_rate: Option<f64>,
    pub respiratory: Option<f64>,
    pub cardiovascular: Option<f64>,
    pub median_age: Option<f64>,
}

impl CountryDetail {
    pub fn has_data(&self) -> bool {
        self.pm25.is_some()
            || self.population.is_some()
            || self.death_rate.is_some()
            || self.respiratory.is_some()
            || self.cardiovascular.is_some()
            || self.median_age.is_some()
    }
}

/// PM2.5 series plus a companion series for the dual-axis trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualTrend {
    pub primary: Vec<TrendPoint>,
    pub companion: Vec<TrendPoint>,
}

impl DualTrend {
    /// True when neither axis has anything to plot.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.companion.is_empty()
    }
}

/// One bar of the ranked death-rate chart. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCountry {
    pub rank: usize,
    pub country: String,
    pub death_rate: f64,
}

/// One spoke of the radar chart.
///
/// `axis_max` is the dataset-wide maximum for the selected year; an axis
/// with a missing or zero maximum normalizes to `None` and renders empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarAxis {
    pub label: &'static str,
    pub raw: Option<f64>,
    pub axis_max: Option<f64>,
    pub normalized: Option<f64>,
}

/// The four-axis radar comparison for one `(country, year)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarProfile {
    pub country: String,
    pub year: i32,
    pub scale_max: f64,
    pub axes: Vec<RadarAxis>,
}

impl RadarProfile {
    pub fn has_data(&self) -> bool {
        self.axes.iter().any(|axis| axis.normalized.is_some())
    }
}

/// A member row inside a mortality-range tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeMember {
    pub country: String,
    pub death_rate: f64,
}

/// One PM2.5 range bucket as rendered: full-bucket averages and counts,
/// but only the top members carried for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityRange {
    pub range: String,
    pub avg_death_rate: f64,
    pub avg_pm25: f64,
    pub count: usize,
    pub top: Vec<RangeMember>,
}

impl MortalityRange {
    /// Countries shown per bucket tooltip.
    pub const TOP_DISPLAY: usize = 5;

    pub fn from_bucket(bucket: &RangeBucket) -> Self {
        MortalityRange {
            range: bucket.label.clone(),
            avg_death_rate: bucket.avg_death_rate,
            avg_pm25: bucket.avg_pm25,
            count: bucket.count,
            top: bucket
                .top(Self::TOP_DISPLAY)
                .iter()
                .map(|m| RangeMember {
                    country: m.country.clone(),
                    death_rate: m.death_rate,
                })
                .collect(),
        }
    }
}
