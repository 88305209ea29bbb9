//! Schema-validated parsing of country-by-year CSV tables.

use crate::dataset::TableSchema;
use crate::year_index::YearIndex;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fmt;

/// Header columns whose integer value falls outside this range are not
/// treated as year columns.
pub const YEAR_COLUMN_MIN: i32 = 1900;
pub const YEAR_COLUMN_MAX: i32 = 2100;

/// Errors that make an entire table unusable. Row-level problems (missing
/// key, non-numeric cells) are handled per row and never abort the parse.
#[derive(Debug, PartialEq, Eq)]
pub enum TableError {
    /// The header row does not contain the schema's key column.
    MissingKeyColumn { table: String, key: String },
    /// The header row contains no year columns at all.
    NoYearColumns { table: String },
    /// The CSV reader failed before any row could be read.
    Malformed { table: String, detail: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingKeyColumn { table, key } => {
                write!(f, "{table}: header has no '{key}' column")
            }
            TableError::NoYearColumns { table } => {
                write!(f, "{table}: header has no year columns")
            }
            TableError::Malformed { table, detail } => {
                write!(f, "{table}: malformed CSV: {detail}")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// One parsed row: a trimmed country name and its per-year cells, parallel
/// to [`RawTable::year_columns`]. `None` marks an empty or non-numeric cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country: String,
    pub values: Vec<Option<f64>>,
}

/// A parsed country-by-year table. Row order is preserved from the source
/// file; downstream stable sorts rely on it for tie-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub name: String,
    pub year_columns: Vec<i32>,
    pub rows: Vec<CountryRow>,
}

impl RawTable {
    /// Parse CSV text against an explicit schema.
    ///
    /// Rows with an empty key cell and rows duplicating an earlier country
    /// are skipped with a warning. Cells that are empty or fail to parse as
    /// a number become `None` for that `(year, country)` pair only.
    pub fn parse(csv_text: &str, schema: &TableSchema) -> Result<RawTable, TableError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| TableError::Malformed {
                table: schema.name.to_string(),
                detail: e.to_string(),
            })?
            .clone();

        let key_idx = headers
            .iter()
            .position(|h| h == schema.key_column)
            .ok_or_else(|| TableError::MissingKeyColumn {
                table: schema.name.to_string(),
                key: schema.key_column.to_string(),
            })?;

        // (column index, year) for every header that names a plausible year.
        let year_columns: Vec<(usize, i32)> = headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != key_idx)
            .filter_map(|(i, h)| match h.parse::<i32>() {
                Ok(y) if (YEAR_COLUMN_MIN..=YEAR_COLUMN_MAX).contains(&y) => Some((i, y)),
                _ => {
                    if !h.is_empty() {
                        log::debug!("{}: ignoring non-year column '{}'", schema.name, h);
                    }
                    None
                }
            })
            .collect();

        if year_columns.is_empty() {
            return Err(TableError::NoYearColumns {
                table: schema.name.to_string(),
            });
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::new();

        for (row_no, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    log::warn!("{}: skipping unreadable row {}: {}", schema.name, row_no + 1, e);
                    continue;
                }
            };

            let country = record.get(key_idx).unwrap_or("").trim();
            if country.is_empty() {
                log::warn!("{}: row {} has no country name, skipped", schema.name, row_no + 1);
                continue;
            }
            if !seen.insert(country.to_string()) {
                log::warn!("{}: duplicate country '{}', keeping first", schema.name, country);
                continue;
            }

            let values = year_columns
                .iter()
                .map(|&(idx, _)| {
                    let cell = record.get(idx).unwrap_or("").trim();
                    if cell.is_empty() {
                        None
                    } else {
                        cell.parse::<f64>().ok()
                    }
                })
                .collect();

            rows.push(CountryRow {
                country: country.to_string(),
                values,
            });
        }

        Ok(RawTable {
            name: schema.name.to_string(),
            year_columns: year_columns.into_iter().map(|(_, y)| y).collect(),
            rows,
        })
    }

    /// Invert the table into a `year -> country -> value` lookup.
    /// Only present, numeric cells produce entries.
    pub fn align(&self) -> YearIndex {
        let mut index = YearIndex::default();
        for row in &self.rows {
            for (year, value) in self.year_columns.iter().zip(&row.values) {
                if let Some(v) = value {
                    index.insert(*year, &row.country, *v);
                }
            }
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: TableSchema = TableSchema {
        name: "test_table",
        key_column: "Country",
    };

    #[test]
    fn parse_and_align_basic_table() {
        let csv = "Country,2010,2011\nNumeria,12.5,\nBorduria,3.0,4.5\n";
        let table = RawTable::parse(csv, &SCHEMA).unwrap();
        assert_eq!(table.year_columns, vec![2010, 2011]);
        assert_eq!(table.len(), 2);

        let index = table.align();
        assert_eq!(index.get(2010, "Numeria"), Some(12.5));
        // Empty cell means "no data", not zero.
        assert_eq!(index.get(2011, "Numeria"), None);
        assert_eq!(index.get(2011, "Borduria"), Some(4.5));
    }

    #[test]
    fn key_column_values_are_trimmed() {
        let csv = "Country,2010\n  Numeria  ,1.0\n";
        let table = RawTable::parse(csv, &SCHEMA).unwrap();
        assert_eq!(table.rows[0].country, "Numeria");
    }

    #[test]
    fn rows_without_a_key_are_skipped_not_fatal() {
        let csv = "Country,2010\n,5.0\nNumeria,1.0\n";
        let table = RawTable::parse(csv, &SCHEMA).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].country, "Numeria");
    }

    #[test]
    fn duplicate_countries_keep_the_first_row() {
        let csv = "Country,2010\nNumeria,1.0\nNumeria,9.0\n";
        let table = RawTable::parse(csv, &SCHEMA).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.align().get(2010, "Numeria"), Some(1.0));
    }

    #[test]
    fn non_numeric_cells_become_gaps() {
        let csv = "Country,2010,2011\nNumeria,n/a,7.0\n";
        let index = RawTable::parse(csv, &SCHEMA).unwrap().align();
        assert_eq!(index.get(2010, "Numeria"), None);
        assert_eq!(index.get(2011, "Numeria"), Some(7.0));
    }

    #[test]
    fn non_year_columns_are_ignored() {
        let csv = "Country,Code,2010\nNumeria,NUM,1.5\n";
        let table = RawTable::parse(csv, &SCHEMA).unwrap();
        assert_eq!(table.year_columns, vec![2010]);
        assert_eq!(table.align().get(2010, "Numeria"), Some(1.5));
    }

    #[test]
    fn missing_key_column_is_an_error() {
        let csv = "Nation,2010\nNumeria,1.0\n";
        let err = RawTable::parse(csv, &SCHEMA).unwrap_err();
        assert_eq!(
            err,
            TableError::MissingKeyColumn {
                table: "test_table".to_string(),
                key: "Country".to_string(),
            }
        );
    }

    #[test]
    fn header_without_years_is_an_error() {
        let csv = "Country,Code\nNumeria,NUM\n";
        assert!(matches!(
            RawTable::parse(csv, &SCHEMA),
            Err(TableError::NoYearColumns { .. })
        ));
    }
}
