//! The `year -> country -> value` lookup charts are built on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Inverted view of a [`crate::RawTable`]. Read-only after ingestion; every
/// selection change builds new derived structures instead of mutating this.
///
/// Absent `(year, country)` pairs mean "no data". No lookup ever returns
/// zero as a stand-in for a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearIndex {
    values: BTreeMap<i32, HashMap<String, f64>>,
}

impl YearIndex {
    pub fn insert(&mut self, year: i32, country: &str, value: f64) {
        self.values
            .entry(year)
            .or_default()
            .insert(country.to_string(), value);
    }

    pub fn get(&self, year: i32, country: &str) -> Option<f64> {
        self.values.get(&year)?.get(country).copied()
    }

    /// Years with at least one country value, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.keys().copied()
    }

    pub fn year_set(&self) -> BTreeSet<i32> {
        self.values.keys().copied().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.values.keys().next_back().copied()
    }

    /// All `(country, value)` pairs recorded for a year.
    pub fn country_values(&self, year: i32) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .get(&year)
            .into_iter()
            .flat_map(|m| m.iter().map(|(c, v)| (c.as_str(), *v)))
    }

    /// Dataset-wide maximum for one year. `None` when the year is absent.
    pub fn max_in_year(&self, year: i32) -> Option<f64> {
        self.values
            .get(&year)?
            .values()
            .copied()
            .reduce(f64::max)
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.values.values().any(|m| m.contains_key(country))
    }

    /// Sorted list of every country appearing in any year.
    pub fn countries(&self) -> Vec<String> {
        let mut names: BTreeSet<&str> = BTreeSet::new();
        for year in self.values.values() {
            names.extend(year.keys().map(String::as_str));
        }
        names.into_iter().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sorted ascending intersection of the year sets of all given indexes.
///
/// An empty input slice and any empty index both yield an empty result:
/// a view with nothing to intersect has no renderable range.
pub fn common_years(indices: &[&YearIndex]) -> Vec<i32> {
    let mut iter = indices.iter();
    let first = match iter.next() {
        Some(index) => index.year_set(),
        None => return Vec::new(),
    };
    let common = iter.fold(first, |acc, index| {
        acc.intersection(&index.year_set()).copied().collect()
    });
    common.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with_years(years: &[i32]) -> YearIndex {
        let mut index = YearIndex::default();
        for &y in years {
            index.insert(y, "Numeria", 1.0);
        }
        index
    }

    #[test]
    fn common_years_is_the_sorted_intersection() {
        let a = index_with_years(&[2012, 2010, 2011]);
        let b = index_with_years(&[2011, 2012, 2013]);
        assert_eq!(common_years(&[&a, &b]), vec![2011, 2012]);
    }

    #[test]
    fn common_years_with_an_empty_index_is_empty() {
        let a = index_with_years(&[2010, 2011]);
        let empty = YearIndex::default();
        assert!(common_years(&[&a, &empty]).is_empty());
        assert!(common_years(&[]).is_empty());
    }

    #[test]
    fn max_in_year_ignores_other_years() {
        let mut index = YearIndex::default();
        index.insert(2010, "Numeria", 5.0);
        index.insert(2010, "Borduria", 8.0);
        index.insert(2011, "Numeria", 100.0);
        assert_eq!(index.max_in_year(2010), Some(8.0));
        assert_eq!(index.max_in_year(2012), None);
    }

    #[test]
    fn countries_are_deduplicated_and_sorted() {
        let mut index = YearIndex::default();
        index.insert(2010, "Borduria", 1.0);
        index.insert(2011, "Borduria", 2.0);
        index.insert(2010, "Numeria", 3.0);
        assert_eq!(index.countries(), vec!["Borduria", "Numeria"]);
    }

    #[test]
    fn latest_year_tracks_the_highest_inserted_year() {
        let index = index_with_years(&[1995, 2020, 2003]);
        assert_eq!(index.latest_year(), Some(2020));
        assert_eq!(YearIndex::default().latest_year(), None);
    }
}
