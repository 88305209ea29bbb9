//! Bucketing of countries into PM2.5 concentration ranges.

use serde::Serialize;
use std::collections::BTreeMap;

/// One country's pairing of PM2.5 level and derived death rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRecord {
    pub country: String,
    pub pm25: f64,
    pub death_rate: f64,
}

/// Aggregate for one occupied PM2.5 range bucket.
///
/// `members` holds every country in the bucket, sorted descending by death
/// rate (stable, so equal rates keep their input order). The averages are
/// computed over all members; a display layer truncating to a top-5 must
/// not change the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBucket {
    pub lower: f64,
    pub label: String,
    pub members: Vec<RangeRecord>,
    pub avg_death_rate: f64,
    pub avg_pm25: f64,
    pub count: usize,
}

impl RangeBucket {
    /// The highest-mortality members, for tooltip sub-displays.
    pub fn top(&self, n: usize) -> &[RangeRecord] {
        &self.members[..self.members.len().min(n)]
    }
}

/// Bucket records by `floor(pm25 / width) * width`, ascending by lower
/// bound. Empty buckets are omitted, not zero-filled.
pub fn group_by_range(records: Vec<RangeRecord>, width: f64) -> Vec<RangeBucket> {
    if width <= 0.0 {
        log::warn!("group_by_range called with non-positive width {width}");
        return Vec::new();
    }

    // i64 keys keep the BTreeMap ordering exact; lower = key * width.
    let mut buckets: BTreeMap<i64, Vec<RangeRecord>> = BTreeMap::new();
    for record in records {
        let slot = (record.pm25 / width).floor() as i64;
        buckets.entry(slot).or_default().push(record);
    }

    buckets
        .into_iter()
        .map(|(slot, mut members)| {
            members.sort_by(|a, b| {
                b.death_rate
                    .partial_cmp(&a.death_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let count = members.len();
            let avg_death_rate =
                members.iter().map(|m| m.death_rate).sum::<f64>() / count as f64;
            let avg_pm25 = members.iter().map(|m| m.pm25).sum::<f64>() / count as f64;
            let lower = slot as f64 * width;
            RangeBucket {
                lower,
                label: format!("{}-{}", lower, lower + width),
                members,
                avg_death_rate,
                avg_pm25,
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, pm25: f64, death_rate: f64) -> RangeRecord {
        RangeRecord {
            country: country.to_string(),
            pm25,
            death_rate,
        }
    }

    #[test]
    fn buckets_by_floored_lower_bound() {
        let buckets = group_by_range(
            vec![
                record("A", 5.0, 0.01),
                record("B", 12.0, 0.02),
                record("C", 15.0, 0.03),
                record("D", 27.0, 0.04),
            ],
            10.0,
        );
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["0-10", "10-20", "20-30"]);
        assert_eq!(buckets[1].count, 2);
        // The 20-30 gap between occupied buckets is not zero-filled.
        assert_eq!(buckets.len(), 3);
    }

    #[test]
    fn members_sorted_by_death_rate_descending() {
        let buckets = group_by_range(
            vec![record("A", 11.0, 0.01), record("B", 12.0, 0.05), record("C", 13.0, 0.03)],
            10.0,
        );
        let order: Vec<_> = buckets[0].members.iter().map(|m| m.country.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let buckets = group_by_range(
            vec![record("First", 11.0, 0.02), record("Second", 12.0, 0.02)],
            10.0,
        );
        let order: Vec<_> = buckets[0].members.iter().map(|m| m.country.as_str()).collect();
        assert_eq!(order, vec!["First", "Second"]);
    }

    #[test]
    fn averages_cover_all_members_not_just_the_top() {
        let members: Vec<_> = (0..8)
            .map(|i| record(&format!("C{i}"), 15.0, i as f64))
            .collect();
        let buckets = group_by_range(members, 10.0);
        let bucket = &buckets[0];
        assert_eq!(bucket.count, 8);
        assert_eq!(bucket.top(5).len(), 5);
        // avg of 0..=7 is 3.5 regardless of the displayed top-5.
        assert_eq!(bucket.avg_death_rate, 3.5);
        assert_eq!(bucket.avg_pm25, 15.0);
    }

    #[test]
    fn top_tolerates_small_buckets() {
        let buckets = group_by_range(vec![record("A", 1.0, 0.1)], 10.0);
        assert_eq!(buckets[0].top(5).len(), 1);
    }

    #[test]
    fn empty_input_produces_no_buckets() {
        assert!(group_by_range(Vec::new(), 10.0).is_empty());
    }
}
