//! Core types and dataset ingestion for global PM2.5 exposure data.
//!
//! This crate owns everything upstream of derivation and rendering:
//! - [`Dataset`] / [`Metric`]: the static CSV resources and the metrics
//!   the charts can display (some derived from more than one dataset).
//! - [`RawTable`]: a schema-validated parse of one country-by-year CSV.
//! - [`YearIndex`]: the `year -> country -> value` lookup every chart
//!   query is built on, plus the common-year intersection.
//! - [`WorldGeometry`]: validated world-map GeoJSON with country names
//!   extracted for joining against the CSV tables.
//!
//! A `(year, country)` pair absent from a [`YearIndex`] means "no data",
//! never zero. Everything downstream carries that absence as `Option`.

pub mod dataset;
pub mod geometry;
pub mod metric;
pub mod raw_table;
pub mod year_index;

pub use dataset::{Dataset, TableSchema};
pub use geometry::WorldGeometry;
pub use metric::Metric;
pub use raw_table::{RawTable, TableError};
pub use year_index::{common_years, YearIndex};
