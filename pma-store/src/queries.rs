//! Typed chart queries over the loaded datasets.
//!
//! Every query builds fresh result structures; nothing hands out borrows
//! of the underlying indexes. A dataset that failed to load simply makes
//! the queries needing it come back empty; the missing-data contract is
//! `Option`/empty, never a panic.

use crate::models::{
    CountryDetail, CountryValue, DualTrend, MortalityRange, RadarAxis, RadarProfile,
    RankedCountry,
};
use crate::DataStore;
use pma_data::{
    country_trend, death_rate_percent, group_by_range, normalize_to_scale, radial_series,
    rank_descending, RadialPoint, RangeRecord, TrendPoint,
};
use pma_dataset::{common_years, Dataset, Metric};

/// Radar values are normalized onto a 0..=10 scale.
pub const RADAR_SCALE_MAX: f64 = 10.0;

/// The four spokes of the radar comparison, in drawing order.
pub const RADAR_METRICS: [Metric; 4] = [
    Metric::Pm25,
    Metric::Population,
    Metric::Respiratory,
    Metric::Cardiovascular,
];

impl DataStore {
    /// Sorted intersection of the years available across every dataset the
    /// metric needs. Empty if any required dataset is missing, since the view
    /// then has no renderable range.
    pub fn common_years(&self, metric: Metric) -> Vec<i32> {
        let inner = self.inner.borrow();
        let mut indexes = Vec::new();
        for dataset in metric.datasets() {
            match inner.indexes.get(dataset) {
                Some(index) => indexes.push(index),
                None => return Vec::new(),
            }
        }
        common_years(&indexes)
    }

    /// One metric value for one `(year, country)`, deriving where needed.
    pub fn metric_value(&self, metric: Metric, year: i32, country: &str) -> Option<f64> {
        let inner = self.inner.borrow();
        match metric {
            Metric::DeathByPm => {
                let counts = inner.indexes.get(&Dataset::DeathByPm)?;
                let population = inner.indexes.get(&Dataset::Population)?;
                death_rate_percent(counts, population, year, country)
            }
            _ => inner.indexes.get(&metric.datasets()[0])?.get(year, country),
        }
    }

    /// Per-country values of one metric for one year, sorted by country
    /// name. Countries whose value cannot be derived are omitted.
    pub fn choropleth(&self, metric: Metric, year: i32) -> Vec<CountryValue> {
        let countries = {
            let inner = self.inner.borrow();
            match inner.indexes.get(&metric.datasets()[0]) {
                Some(index) => index
                    .country_values(year)
                    .map(|(c, _)| c.to_string())
                    .collect::<Vec<_>>(),
                None => return Vec::new(),
            }
        };

        let mut values: Vec<CountryValue> = countries
            .into_iter()
            .filter_map(|country| {
                self.metric_value(metric, year, &country)
                    .map(|value| CountryValue { country, value })
            })
            .collect();
        values.sort_by(|a, b| a.country.cmp(&b.country));
        values
    }

    /// Sorted list of countries a metric's primary dataset knows about,
    /// for selector dropdowns.
    pub fn countries(&self, metric: Metric) -> Vec<String> {
        let inner = self.inner.borrow();
        inner
            .indexes
            .get(&metric.datasets()[0])
            .map(|index| index.countries())
            .unwrap_or_default()
    }

    /// Every metric for one `(country, year)`, for tooltips.
    pub fn country_detail(&self, country: &str, year: i32) -> CountryDetail {
        CountryDetail {
            country: country.to_string(),
            year,
            pm25: self.metric_value(Metric::Pm25, year, country),
            population: self.metric_value(Metric::Population, year, country),
            death_rate: self.metric_value(Metric::DeathByPm, year, country),
            respiratory: self.metric_value(Metric::Respiratory, year, country),
            cardiovascular: self.metric_value(Metric::Cardiovascular, year, country),
            median_age: self.metric_value(Metric::MedianAge, year, country),
        }
    }

    /// Details for every country any loaded dataset knows, sorted by name.
    pub fn country_details(&self, year: i32) -> Vec<CountryDetail> {
        let names = {
            let inner = self.inner.borrow();
            let mut names: Vec<String> = Vec::new();
            for index in inner.indexes.values() {
                names.extend(index.countries());
            }
            names.sort();
            names.dedup();
            names
        };
        names
            .into_iter()
            .map(|country| self.country_detail(&country, year))
            .collect()
    }

    /// The PM2.5 series and a companion metric's series for one country.
    pub fn dual_trend(&self, companion: Metric, country: &str) -> DualTrend {
        let primary = {
            let inner = self.inner.borrow();
            inner
                .indexes
                .get(&Dataset::Pm25Exposure)
                .map(|index| country_trend(index, country))
                .unwrap_or_default()
        };

        let companion_years = if companion.is_derived() {
            self.common_years(companion)
        } else {
            let inner = self.inner.borrow();
            inner
                .indexes
                .get(&companion.datasets()[0])
                .map(|index| index.years().collect())
                .unwrap_or_default()
        };

        let companion_series: Vec<TrendPoint> = companion_years
            .into_iter()
            .filter_map(|year| {
                self.metric_value(companion, year, country)
                    .map(|value| TrendPoint { year, value })
            })
            .collect();

        DualTrend {
            primary,
            companion: companion_series,
        }
    }

    /// Per-year radial points (PM2.5 radius, population size, growth color)
    /// for one country.
    pub fn radial(&self, country: &str) -> Vec<RadialPoint> {
        let inner = self.inner.borrow();
        let (Some(pm25), Some(population)) = (
            inner.indexes.get(&Dataset::Pm25Exposure),
            inner.indexes.get(&Dataset::Population),
        ) else {
            return Vec::new();
        };
        radial_series(pm25, population, country)
    }

    /// Radar comparison for one `(country, year)`.
    ///
    /// Axis maxima are dataset-wide for the selected year (not country-local
    /// and not all-time), so the same country reads differently as the year
    /// selection moves; see DESIGN.md for the scope decision.
    pub fn radar_profile(&self, country: &str, year: i32) -> RadarProfile {
        let raw: Vec<Option<f64>> = RADAR_METRICS
            .iter()
            .map(|m| self.metric_value(*m, year, country))
            .collect();

        let maxima: Vec<f64> = {
            let inner = self.inner.borrow();
            RADAR_METRICS
                .iter()
                .map(|m| {
                    inner
                        .indexes
                        .get(&m.datasets()[0])
                        .and_then(|index| index.max_in_year(year))
                        .unwrap_or(0.0)
                })
                .collect()
        };

        let normalized = normalize_to_scale(&raw, &maxima, RADAR_SCALE_MAX);

        let axes = RADAR_METRICS
            .iter()
            .zip(raw)
            .zip(maxima)
            .zip(normalized)
            .map(|(((metric, raw), max), normalized)| RadarAxis {
                label: metric.label(),
                raw,
                axis_max: (max > 0.0).then_some(max),
                normalized,
            })
            .collect();

        RadarProfile {
            country: country.to_string(),
            year,
            scale_max: RADAR_SCALE_MAX,
            axes,
        }
    }

    /// Countries ranked descending by derived death rate for one year.
    /// Ties keep source row order.
    pub fn top_countries(&self, year: i32, n: usize) -> Vec<RankedCountry> {
        let order = {
            let inner = self.inner.borrow();
            inner
                .row_order
                .get(&Dataset::DeathByPm)
                .cloned()
                .unwrap_or_default()
        };

        let entries: Vec<(String, f64)> = order
            .into_iter()
            .filter_map(|country| {
                self.metric_value(Metric::DeathByPm, year, &country)
                    .map(|rate| (country, rate))
            })
            .collect();

        rank_descending(entries, n)
            .into_iter()
            .enumerate()
            .map(|(i, (country, death_rate))| RankedCountry {
                rank: i + 1,
                country,
                death_rate,
            })
            .collect()
    }

    /// PM2.5 range buckets with death-rate aggregates for one year.
    pub fn mortality_ranges(&self, year: i32, bucket_width: f64) -> Vec<MortalityRange> {
        let order = {
            let inner = self.inner.borrow();
            inner
                .row_order
                .get(&Dataset::Pm25Exposure)
                .cloned()
                .unwrap_or_default()
        };

        let records: Vec<RangeRecord> = order
            .into_iter()
            .filter_map(|country| {
                let pm25 = self.metric_value(Metric::Pm25, year, &country)?;
                let death_rate = self.metric_value(Metric::DeathByPm, year, &country)?;
                Some(RangeRecord {
                    country,
                    pm25,
                    death_rate,
                })
            })
            .collect();

        group_by_range(records, bucket_width)
            .iter()
            .map(MortalityRange::from_bucket)
            .collect()
    }

    /// The raw GeoJSON for the map renderer, if geometry has loaded.
    pub fn geometry_json(&self) -> Option<String> {
        self.inner
            .borrow()
            .geometry
            .as_ref()
            .map(|g| g.raw_json().to_string())
    }

    /// Country names present in the geometry, in feature order.
    pub fn geometry_names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .geometry
            .as_ref()
            .map(|g| g.names().to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(datasets: &[(Dataset, &str)]) -> DataStore {
        let store = DataStore::new();
        for (dataset, csv) in datasets {
            store.load_csv(*dataset, csv).unwrap();
        }
        store
    }

    #[test]
    fn end_to_end_death_rate_scenario() {
        // 55 deaths over 1.1M people in 2011 must read as 0.005%.
        let store = store_with(&[
            (
                Dataset::Population,
                "Country,2010,2011\nNumeria,1000000,1100000\n",
            ),
            (Dataset::DeathByPm, "Country,2010,2011\nNumeria,50,55\n"),
        ]);

        let rate = store
            .metric_value(Metric::DeathByPm, 2011, "Numeria")
            .unwrap();
        assert!((rate - 0.005).abs() < 1e-12);
        assert_eq!(store.common_years(Metric::DeathByPm), vec![2010, 2011]);
    }

    #[test]
    fn missing_dataset_degrades_to_empty_not_zero() {
        let store = store_with(&[(Dataset::DeathByPm, "Country,2011\nNumeria,55\n")]);
        // Population never loaded: no derived value, no common years.
        assert_eq!(store.metric_value(Metric::DeathByPm, 2011, "Numeria"), None);
        assert!(store.common_years(Metric::DeathByPm).is_empty());
        assert!(store.top_countries(2011, 10).is_empty());
    }

    #[test]
    fn country_absent_from_one_dataset_has_no_derived_value() {
        let store = store_with(&[
            (Dataset::Population, "Country,2011\nNumeria,1000\n"),
            (Dataset::DeathByPm, "Country,2011\nBorduria,5\n"),
        ]);
        assert_eq!(store.metric_value(Metric::DeathByPm, 2011, "Borduria"), None);
        assert!(store.choropleth(Metric::DeathByPm, 2011).is_empty());
    }

    #[test]
    fn choropleth_is_sorted_and_skips_gaps() {
        let store = store_with(&[(
            Dataset::Pm25Exposure,
            "Country,2019,2020\nNumeria,12.5,11.0\nBorduria,,9.0\nSyldavia,8.0,\n",
        )]);
        let values = store.choropleth(Metric::Pm25, 2020);
        let names: Vec<_> = values.iter().map(|v| v.country.as_str()).collect();
        assert_eq!(names, vec!["Borduria", "Numeria"]);
    }

    #[test]
    fn country_detail_mixes_present_and_absent_metrics() {
        let store = store_with(&[
            (Dataset::Pm25Exposure, "Country,2020\nNumeria,12.5\n"),
            (Dataset::MedianAge, "Country,2020\nNumeria,38.2\n"),
        ]);
        let detail = store.country_detail("Numeria", 2020);
        assert_eq!(detail.pm25, Some(12.5));
        assert_eq!(detail.median_age, Some(38.2));
        assert_eq!(detail.death_rate, None);
        assert!(detail.has_data());
        assert!(!store.country_detail("Borduria", 2020).has_data());
    }

    #[test]
    fn dual_trend_pairs_pm25_with_a_companion() {
        let store = store_with(&[
            (
                Dataset::Pm25Exposure,
                "Country,2018,2019,2020\nNumeria,14.0,13.0,12.0\n",
            ),
            (
                Dataset::RespiratoryDeathRate,
                "Country,2019,2020\nNumeria,41.0,39.5\n",
            ),
        ]);
        let trend = store.dual_trend(Metric::Respiratory, "Numeria");
        assert_eq!(trend.primary.len(), 3);
        assert_eq!(trend.companion.len(), 2);
        assert_eq!(trend.companion[0].year, 2019);

        let nothing = store.dual_trend(Metric::Respiratory, "Borduria");
        assert!(nothing.is_empty());
    }

    #[test]
    fn radar_normalizes_against_selected_year_maxima() {
        let store = store_with(&[
            (
                Dataset::Pm25Exposure,
                "Country,2019,2020\nNumeria,5.0,10.0\nBorduria,50.0,20.0\n",
            ),
            (Dataset::Population, "Country,2020\nNumeria,100\nBorduria,400\n"),
            (
                Dataset::RespiratoryDeathRate,
                "Country,2020\nNumeria,30.0\nBorduria,60.0\n",
            ),
            (
                Dataset::CardiovascularDeathRate,
                "Country,2020\nNumeria,0.0\nBorduria,0.0\n",
            ),
        ]);

        let profile = store.radar_profile("Numeria", 2020);
        assert!(profile.has_data());
        // 2020 maxima apply, not the larger 2019 PM2.5 value.
        assert_eq!(profile.axes[0].axis_max, Some(20.0));
        assert_eq!(profile.axes[0].normalized, Some(5.0));
        assert_eq!(profile.axes[1].normalized, Some(2.5));
        assert_eq!(profile.axes[2].normalized, Some(5.0));
        // An all-zero axis has no usable maximum and renders empty.
        assert_eq!(profile.axes[3].axis_max, None);
        assert_eq!(profile.axes[3].normalized, None);
    }

    #[test]
    fn radar_for_unknown_country_is_empty_but_well_formed() {
        let store = store_with(&[(Dataset::Pm25Exposure, "Country,2020\nNumeria,10.0\n")]);
        let profile = store.radar_profile("Atlantis", 2020);
        assert_eq!(profile.axes.len(), 4);
        assert!(!profile.has_data());
    }

    #[test]
    fn top_countries_rank_descending_with_stable_ties() {
        let store = store_with(&[
            (
                Dataset::Population,
                "Country,2020\nNumeria,1000\nBorduria,1000\nSyldavia,1000\n",
            ),
            (
                Dataset::DeathByPm,
                "Country,2020\nNumeria,10\nBorduria,20\nSyldavia,10\n",
            ),
        ]);
        let ranked = store.top_countries(2020, 10);
        let order: Vec<_> = ranked.iter().map(|r| r.country.as_str()).collect();
        // Numeria and Syldavia tie at 1%; source row order breaks the tie.
        assert_eq!(order, vec!["Borduria", "Numeria", "Syldavia"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].death_rate, 2.0);
    }

    #[test]
    fn mortality_ranges_bucket_by_pm25() {
        let store = store_with(&[
            (
                Dataset::Pm25Exposure,
                "Country,2020\nNumeria,5.0\nBorduria,12.0\nSyldavia,15.0\nKhemed,27.0\n",
            ),
            (
                Dataset::Population,
                "Country,2020\nNumeria,1000\nBorduria,1000\nSyldavia,1000\nKhemed,1000\n",
            ),
            (
                Dataset::DeathByPm,
                "Country,2020\nNumeria,1\nBorduria,2\nSyldavia,4\nKhemed,8\n",
            ),
        ]);
        let ranges = store.mortality_ranges(2020, 10.0);
        let labels: Vec<_> = ranges.iter().map(|r| r.range.as_str()).collect();
        assert_eq!(labels, vec!["0-10", "10-20", "20-30"]);
        assert_eq!(ranges[1].count, 2);
        // Syldavia's 0.4% outranks Borduria's 0.2% in the bucket tooltip.
        assert_eq!(ranges[1].top[0].country, "Syldavia");
        assert!((ranges[1].avg_pm25 - 13.5).abs() < 1e-12);
    }

    #[test]
    fn geometry_round_trips_through_the_store() {
        let store = DataStore::new();
        assert!(store.geometry_json().is_none());
        let world = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"name":"Numeria"},
             "geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}]}"#;
        store.load_geometry(world).unwrap();
        assert_eq!(store.geometry_names(), vec!["Numeria"]);
        assert_eq!(store.geometry_json().unwrap(), world);
    }
}
