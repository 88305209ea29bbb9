//! The user's current year/metric/country choice.

use pma_dataset::Metric;
use serde::{Deserialize, Serialize};

/// Explicit, serializable selection state driving what the charts render.
///
/// Created with defaults when a view mounts, mutated by UI events, and
/// discarded on unmount, never persisted. Keeping it as one plain struct
/// (rather than ad hoc per-component variables) lets selection behavior be
/// tested without a rendering environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    /// Selected year; `None` until a common-year range is known.
    pub year: Option<i32>,
    pub metric: Metric,
    pub country: Option<String>,
}

impl Default for SelectionContext {
    fn default() -> Self {
        SelectionContext {
            year: None,
            metric: Metric::Pm25,
            country: None,
        }
    }
}

impl SelectionContext {
    /// Default selection over a known common-year range: latest year,
    /// PM2.5, no country.
    pub fn with_latest_year(years: &[i32]) -> Self {
        SelectionContext {
            year: years.last().copied(),
            ..SelectionContext::default()
        }
    }

    pub fn select_year(&mut self, year: i32) {
        self.year = Some(year);
    }

    pub fn select_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn select_country(&mut self, country: Option<String>) {
        self.country = country;
    }

    /// Snap the selected year onto the nearest entry of a (sorted) common
    /// year set, e.g. after a metric change shrank the range. Clears the
    /// year when the set is empty.
    pub fn snap_year(&mut self, years: &[i32]) {
        let Some(selected) = self.year else {
            self.year = years.last().copied();
            return;
        };
        if years.is_empty() {
            self.year = None;
            return;
        }
        if years.contains(&selected) {
            return;
        }
        let nearest = years
            .iter()
            .copied()
            .min_by_key(|y| (y - selected).abs())
            .unwrap();
        self.year = Some(nearest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_latest_year_and_pm25() {
        let selection = SelectionContext::with_latest_year(&[1990, 2000, 2020]);
        assert_eq!(selection.year, Some(2020));
        assert_eq!(selection.metric, Metric::Pm25);
        assert_eq!(selection.country, None);
    }

    #[test]
    fn snap_keeps_a_year_already_in_range() {
        let mut selection = SelectionContext::with_latest_year(&[2010, 2011, 2012]);
        selection.select_year(2011);
        selection.snap_year(&[2010, 2011, 2012]);
        assert_eq!(selection.year, Some(2011));
    }

    #[test]
    fn snap_moves_to_the_nearest_available_year() {
        let mut selection = SelectionContext::default();
        selection.select_year(2019);
        selection.snap_year(&[1990, 2000, 2010]);
        assert_eq!(selection.year, Some(2010));
    }

    #[test]
    fn snap_clears_the_year_when_nothing_is_available() {
        let mut selection = SelectionContext::default();
        selection.select_year(2010);
        selection.snap_year(&[]);
        assert_eq!(selection.year, None);
    }

    #[test]
    fn serializes_with_snake_case_metric_ids() {
        let mut selection = SelectionContext::with_latest_year(&[2020]);
        selection.select_metric(Metric::DeathByPm);
        selection.select_country(Some("Numeria".to_string()));
        let json = serde_json::to_string(&selection).unwrap();
        assert!(json.contains("\"death_by_pm\""));
        let back: SelectionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
