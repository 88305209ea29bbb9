//! Descending ranking with stable tie order.

/// Sort `(label, value)` entries descending by value and keep the first
/// `n`. The sort is stable: equal values keep their input (CSV row) order.
pub fn rank_descending(mut entries: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs.iter().map(|(c, v)| (c.to_string(), *v)).collect()
    }

    #[test]
    fn ranks_descending_and_truncates() {
        let ranked = rank_descending(entries(&[("A", 1.0), ("B", 3.0), ("C", 2.0)]), 2);
        assert_eq!(ranked, entries(&[("B", 3.0), ("C", 2.0)]));
    }

    #[test]
    fn ties_preserve_input_order() {
        let ranked = rank_descending(
            entries(&[("First", 2.0), ("Second", 2.0), ("Third", 2.0)]),
            3,
        );
        assert_eq!(ranked, entries(&[("First", 2.0), ("Second", 2.0), ("Third", 2.0)]));
    }

    #[test]
    fn shorter_input_than_n_is_fine() {
        assert_eq!(rank_descending(entries(&[("A", 1.0)]), 10).len(), 1);
        assert!(rank_descending(Vec::new(), 10).is_empty());
    }
}
