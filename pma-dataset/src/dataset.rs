//! The static CSV resources the atlas is built from, and their schemas.

use serde::{Deserialize, Serialize};

/// Column layout expected of one country-by-year CSV resource.
///
/// Every dataset in this project shares the same shape: one key column
/// holding the country name, and one column per year. The schema exists so
/// parsing validates against an explicit contract instead of trusting ad hoc
/// key lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    /// Human-readable dataset name, used in log messages.
    pub name: &'static str,
    /// Header of the column holding the country name.
    pub key_column: &'static str,
}

/// One of the static CSV datasets served alongside the chart bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    /// Total population per country per year (World Bank).
    Population,
    /// Mean annual PM2.5 exposure in µg/m³ (OECD / World Bank).
    Pm25Exposure,
    /// Deaths attributed to outdoor particulate matter, raw counts (OWID).
    DeathByPm,
    /// Chronic respiratory disease death rate per 100k (OWID).
    RespiratoryDeathRate,
    /// Cardiovascular disease death rate per 100k (OWID).
    CardiovascularDeathRate,
    /// Median age in years (OWID).
    MedianAge,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::Population,
        Dataset::Pm25Exposure,
        Dataset::DeathByPm,
        Dataset::RespiratoryDeathRate,
        Dataset::CardiovascularDeathRate,
        Dataset::MedianAge,
    ];

    /// File name under the `datasets/` directory served with the apps.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Population => "population.csv",
            Dataset::Pm25Exposure => "oecd_pm25_exposure.csv",
            Dataset::DeathByPm => "death_by_pm.csv",
            Dataset::RespiratoryDeathRate => "respiratory_death_rate.csv",
            Dataset::CardiovascularDeathRate => "cardiovascular_death_rate.csv",
            Dataset::MedianAge => "median_age.csv",
        }
    }

    pub fn schema(&self) -> TableSchema {
        // All six sources were exported with the same key column.
        TableSchema {
            name: match self {
                Dataset::Population => "population",
                Dataset::Pm25Exposure => "pm25_exposure",
                Dataset::DeathByPm => "death_by_pm",
                Dataset::RespiratoryDeathRate => "respiratory_death_rate",
                Dataset::CardiovascularDeathRate => "cardiovascular_death_rate",
                Dataset::MedianAge => "median_age",
            },
            key_column: "Country",
        }
    }

    /// Upstream download URL, used by the native CLI `fetch` command.
    pub fn source_url(&self) -> &'static str {
        match self {
            Dataset::Population => {
                "https://api.worldbank.org/v2/en/indicator/SP.POP.TOTL?downloadformat=csv"
            }
            Dataset::Pm25Exposure => {
                "https://api.worldbank.org/v2/en/indicator/EN.ATM.PM25.MC.M3?downloadformat=csv"
            }
            Dataset::DeathByPm => {
                "https://ourworldindata.org/grapher/absolute-number-of-deaths-from-outdoor-air-pollution.csv"
            }
            Dataset::RespiratoryDeathRate => {
                "https://ourworldindata.org/grapher/respiratory-disease-death-rate.csv"
            }
            Dataset::CardiovascularDeathRate => {
                "https://ourworldindata.org/grapher/cardiovascular-disease-death-rates.csv"
            }
            Dataset::MedianAge => "https://ourworldindata.org/grapher/median-age.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dataset_has_distinct_file_name() {
        let mut names: Vec<_> = Dataset::ALL.iter().map(|d| d.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Dataset::ALL.len());
    }

    #[test]
    fn schemas_share_the_country_key() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.schema().key_column, "Country");
        }
    }
}
