//! Shared formatting utilities for PMA crates.

/// Value formatting shared by chart configs, tooltips, and CLI tables.
pub mod format {
    /// Compact count formatting: 1234 -> "1.2K", 2500000 -> "2.5M",
    /// 1300000000 -> "1.3B".
    pub fn compact_count(value: f64) -> String {
        let magnitude = value.abs();
        if magnitude >= 1_000_000_000.0 {
            format!("{:.1}B", value / 1_000_000_000.0)
        } else if magnitude >= 1_000_000.0 {
            format!("{:.1}M", value / 1_000_000.0)
        } else if magnitude >= 1_000.0 {
            format!("{:.1}K", value / 1_000.0)
        } else {
            format!("{value:.0}")
        }
    }

    /// Death rates are tiny fractions of a percent; four decimals keeps
    /// them distinguishable ("0.0050%").
    pub fn death_rate_percent(value: f64) -> String {
        format!("{value:.4}%")
    }

    /// PM2.5 concentrations with their unit ("12.5 µg/m³").
    pub fn micrograms(value: f64) -> String {
        format!("{value:.1} µg/m³")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn compact_counts() {
            assert_eq!(compact_count(950.0), "950");
            assert_eq!(compact_count(1_234.0), "1.2K");
            assert_eq!(compact_count(2_500_000.0), "2.5M");
            assert_eq!(compact_count(1_300_000_000.0), "1.3B");
        }

        #[test]
        fn rates_and_units() {
            assert_eq!(death_rate_percent(0.005), "0.0050%");
            assert_eq!(micrograms(12.49), "12.5 µg/m³");
        }
    }
}

/// Year-label parsing shared by the CLI.
pub mod years {
    /// Parse a year argument, bounding it to the plausible data range.
    pub fn parse_year(s: &str) -> anyhow::Result<i32> {
        let year: i32 = s.parse()?;
        if !(1900..=2100).contains(&year) {
            anyhow::bail!("year {year} outside supported range 1900-2100");
        }
        Ok(year)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parses_and_bounds() {
            assert_eq!(parse_year("2020").unwrap(), 2020);
            assert!(parse_year("1776").is_err());
            assert!(parse_year("soon").is_err());
        }
    }
}
