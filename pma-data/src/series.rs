//! Per-year series for the trend and radial charts.

use crate::derive::percent_change;
use pma_dataset::YearIndex;
use serde::Serialize;
use std::f64::consts::TAU;

/// One `(year, value)` point of a country's time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// One point of the radial year chart: PM2.5 drives the radius, population
/// the point size, and the changes (relative to the series' first year)
/// drive color and tooltip copy. `angle` is the point's angular position,
/// first year at 0 and the full series spanning one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialPoint {
    pub year: i32,
    pub pm25: f64,
    pub population: f64,
    pub pm25_change: Option<f64>,
    pub population_change: Option<f64>,
    pub angle: f64,
}

/// All years a country has data for in one index, ascending.
pub fn country_trend(index: &YearIndex, country: &str) -> Vec<TrendPoint> {
    index
        .years()
        .filter_map(|year| {
            index.get(year, country).map(|value| TrendPoint { year, value })
        })
        .collect()
}

/// Years where the country has both a PM2.5 and a population value, with
/// changes computed against the first such year. A single-point series is
/// legitimate and gets angle 0.
pub fn radial_series(pm25: &YearIndex, population: &YearIndex, country: &str) -> Vec<RadialPoint> {
    let years: Vec<(i32, f64, f64)> = pm25
        .years()
        .filter_map(|year| {
            let p = pm25.get(year, country)?;
            let pop = population.get(year, country)?;
            Some((year, p, pop))
        })
        .collect();

    let Some(&(_, base_pm25, base_population)) = years.first() else {
        return Vec::new();
    };
    let span = years.len().saturating_sub(1).max(1) as f64;

    years
        .iter()
        .enumerate()
        .map(|(i, &(year, pm25, population))| RadialPoint {
            year,
            pm25,
            population,
            pm25_change: percent_change(Some(base_pm25), Some(pm25)),
            population_change: percent_change(Some(base_population), Some(population)),
            angle: i as f64 / span * TAU,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(i32, &str, f64)]) -> YearIndex {
        let mut index = YearIndex::default();
        for &(year, country, value) in entries {
            index.insert(year, country, value);
        }
        index
    }

    #[test]
    fn trend_skips_years_without_the_country() {
        let idx = index(&[(2010, "Numeria", 1.0), (2011, "Borduria", 2.0), (2012, "Numeria", 3.0)]);
        let trend = country_trend(&idx, "Numeria");
        assert_eq!(
            trend,
            vec![
                TrendPoint { year: 2010, value: 1.0 },
                TrendPoint { year: 2012, value: 3.0 },
            ]
        );
        assert!(country_trend(&idx, "Syldavia").is_empty());
    }

    #[test]
    fn radial_series_requires_both_lookups() {
        let pm25 = index(&[(2010, "Numeria", 10.0), (2011, "Numeria", 12.0), (2012, "Numeria", 15.0)]);
        // 2011 has no population value, so it drops out.
        let population = index(&[(2010, "Numeria", 1000.0), (2012, "Numeria", 1500.0)]);

        let series = radial_series(&pm25, &population, "Numeria");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].year, 2010);
        assert_eq!(series[0].angle, 0.0);
        assert_eq!(series[0].pm25_change, Some(0.0));
        assert_eq!(series[1].year, 2012);
        assert_eq!(series[1].angle, TAU);
        assert_eq!(series[1].pm25_change, Some(50.0));
        assert_eq!(series[1].population_change, Some(50.0));
    }

    #[test]
    fn single_point_series_is_tolerated() {
        let pm25 = index(&[(2010, "Numeria", 10.0)]);
        let population = index(&[(2010, "Numeria", 1000.0)]);
        let series = radial_series(&pm25, &population, "Numeria");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].angle, 0.0);
    }

    #[test]
    fn zero_base_yields_no_change_value() {
        let pm25 = index(&[(2010, "Numeria", 0.0), (2011, "Numeria", 5.0)]);
        let population = index(&[(2010, "Numeria", 100.0), (2011, "Numeria", 100.0)]);
        let series = radial_series(&pm25, &population, "Numeria");
        assert_eq!(series[1].pm25_change, None);
        assert_eq!(series[1].population_change, Some(0.0));
    }
}
