//! Derivation of chart-ready values from aligned dataset lookups.
//!
//! Everything here is pure: functions take [`pma_dataset::YearIndex`]
//! lookups and return new values, so the whole layer is unit-testable
//! without a browser. Missing inputs stay missing: a derived value is
//! `None` whenever any lookup it depends on is absent or a divisor is
//! zero, never `0` and never infinite.

pub mod derive;
pub mod phase;
pub mod ranges;
pub mod rank;
pub mod selection;
pub mod series;

pub use derive::{death_rate_percent, normalize_to_scale, percent_change, percentage};
pub use phase::ChartPhase;
pub use ranges::{group_by_range, RangeBucket, RangeRecord};
pub use rank::rank_descending;
pub use selection::SelectionContext;
pub use series::{country_trend, radial_series, RadialPoint, TrendPoint};
