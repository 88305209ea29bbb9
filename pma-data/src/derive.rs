//! Scalar metric derivation.

use pma_dataset::YearIndex;

/// Death (or any) count as a percentage of population.
///
/// `None` whenever either input is missing or the population is zero; a
/// missing measurement must not masquerade as `0%`, and a zero population
/// must not produce an infinity.
pub fn percentage(count: Option<f64>, population: Option<f64>) -> Option<f64> {
    let count = count?;
    let population = population?;
    if population == 0.0 {
        return None;
    }
    Some(count / population * 100.0)
}

/// Derived mortality rate for one `(year, country)`: raw attributed deaths
/// over total population, as a percent.
pub fn death_rate_percent(
    counts: &YearIndex,
    population: &YearIndex,
    year: i32,
    country: &str,
) -> Option<f64> {
    percentage(counts.get(year, country), population.get(year, country))
}

/// Change of `value` relative to `base`, in percent. `None` when either is
/// missing or the base is zero.
pub fn percent_change(base: Option<f64>, value: Option<f64>) -> Option<f64> {
    let base = base?;
    let value = value?;
    if base == 0.0 {
        return None;
    }
    Some((value - base) / base * 100.0)
}

/// Element-wise `value / max * scale_max`, placing heterogeneous metrics
/// (counts, concentrations, rates) onto one common axis.
///
/// `maxima[i]` must be the dataset-wide maximum for metric `i`; a
/// country-local maximum would make cross-country comparison meaningless.
/// An axis whose maximum is zero (or not finite) yields `None` so the
/// renderer can treat it as empty.
pub fn normalize_to_scale(
    values: &[Option<f64>],
    maxima: &[f64],
    scale_max: f64,
) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(maxima)
        .map(|(value, max)| {
            let v = (*value)?;
            if *max == 0.0 || !max.is_finite() {
                return None;
            }
            Some(v / max * scale_max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_population() {
        assert_eq!(percentage(Some(50.0), Some(1000.0)), Some(5.0));
        let rate = percentage(Some(55.0), Some(1_100_000.0)).unwrap();
        assert!((rate - 0.005).abs() < 1e-12);
    }

    #[test]
    fn percentage_propagates_missing_data() {
        assert_eq!(percentage(None, Some(1000.0)), None);
        assert_eq!(percentage(Some(50.0), None), None);
        // Zero population is "no data", not a division by zero.
        assert_eq!(percentage(Some(50.0), Some(0.0)), None);
    }

    #[test]
    fn death_rate_reads_both_indexes() {
        let mut counts = YearIndex::default();
        let mut population = YearIndex::default();
        counts.insert(2011, "Numeria", 55.0);
        population.insert(2011, "Numeria", 1_100_000.0);
        population.insert(2012, "Numeria", 1_200_000.0);

        let rate = death_rate_percent(&counts, &population, 2011, "Numeria").unwrap();
        assert!((rate - 0.005).abs() < 1e-12);
        // 2012 has population but no death count.
        assert_eq!(death_rate_percent(&counts, &population, 2012, "Numeria"), None);
        assert_eq!(death_rate_percent(&counts, &population, 2011, "Borduria"), None);
    }

    #[test]
    fn percent_change_relative_to_base() {
        assert_eq!(percent_change(Some(50.0), Some(75.0)), Some(50.0));
        assert_eq!(percent_change(Some(50.0), Some(25.0)), Some(-50.0));
        assert_eq!(percent_change(Some(0.0), Some(25.0)), None);
        assert_eq!(percent_change(None, Some(25.0)), None);
    }

    #[test]
    fn normalization_bounds_and_gaps() {
        let values = [Some(5.0), Some(10.0), None, Some(3.0)];
        let maxima = [10.0, 10.0, 10.0, 0.0];
        let normalized = normalize_to_scale(&values, &maxima, 10.0);
        assert_eq!(normalized, vec![Some(5.0), Some(10.0), None, None]);
    }

    #[test]
    fn normalization_is_scale_invariant() {
        let normalized = normalize_to_scale(&[Some(4.0)], &[8.0], 10.0);
        let scaled = normalize_to_scale(&[Some(400.0)], &[800.0], 10.0);
        assert_eq!(normalized, scaled);
        assert_eq!(normalized[0], Some(5.0));
    }
}
