//! The metrics a chart can display, and the datasets each one needs.

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A displayable metric. Most map 1:1 onto a [`Dataset`]; `DeathByPm` is
/// derived from raw death counts and population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Pm25,
    Population,
    DeathByPm,
    Respiratory,
    Cardiovascular,
    MedianAge,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Pm25,
        Metric::Population,
        Metric::DeathByPm,
        Metric::Respiratory,
        Metric::Cardiovascular,
        Metric::MedianAge,
    ];

    /// Stable identifier used in selector values and serialized state.
    pub fn id(&self) -> &'static str {
        match self {
            Metric::Pm25 => "pm25",
            Metric::Population => "population",
            Metric::DeathByPm => "death_by_pm",
            Metric::Respiratory => "respiratory",
            Metric::Cardiovascular => "cardiovascular",
            Metric::MedianAge => "median_age",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Pm25 => "PM2.5 Exposure Level",
            Metric::Population => "Population",
            Metric::DeathByPm => "PM2.5 Mortality Rate",
            Metric::Respiratory => "Respiratory Death Rate",
            Metric::Cardiovascular => "Cardiovascular Death Rate",
            Metric::MedianAge => "Median Age",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Pm25 => "µg/m³",
            Metric::Population => "",
            Metric::DeathByPm => "% of population",
            Metric::Respiratory => "per 100k",
            Metric::Cardiovascular => "per 100k",
            Metric::MedianAge => "years",
        }
    }

    /// The datasets that must be loaded before this metric can be looked up.
    pub fn datasets(&self) -> &'static [Dataset] {
        match self {
            Metric::Pm25 => &[Dataset::Pm25Exposure],
            Metric::Population => &[Dataset::Population],
            Metric::DeathByPm => &[Dataset::DeathByPm, Dataset::Population],
            Metric::Respiratory => &[Dataset::RespiratoryDeathRate],
            Metric::Cardiovascular => &[Dataset::CardiovascularDeathRate],
            Metric::MedianAge => &[Dataset::MedianAge],
        }
    }

    /// True when the metric is computed from more than one dataset rather
    /// than read directly out of a table.
    pub fn is_derived(&self) -> bool {
        self.datasets().len() > 1
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| format!("unknown metric: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(metric.id().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn death_by_pm_is_the_only_derived_metric() {
        for metric in Metric::ALL {
            assert_eq!(metric.is_derived(), metric == Metric::DeathByPm);
        }
        assert_eq!(
            Metric::DeathByPm.datasets(),
            &[Dataset::DeathByPm, Dataset::Population]
        );
    }
}
