//! CSV Data Loader Module
//! Loads the semicolon-delimited quarterly table using Polars and converts
//! it into an ordered, cleaned sequence of observations.

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::periods::parse_period_label;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Malformed period label: {0:?} (expected \"YYYY-Qn\")")]
    MalformedPeriodLabel(String),
    #[error("Input has {0} columns, need at least 3 (period, series A, series B)")]
    MissingColumns(usize),
    #[error("No rows remain after dropping missing values")]
    EmptyDataset,
}

/// One cleaned row of the quarterly table.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub period: String,
    pub date: NaiveDate,
    pub series_a: f64,
    pub series_b: f64,
}

/// Ordered quarterly table of two GDP series.
///
/// Rows are sorted ascending by date and contain no missing values; rows
/// where either series was missing or unparseable are dropped at load time
/// (never imputed).
#[derive(Debug, Clone, Default)]
pub struct QuarterlyTable {
    pub rows: Vec<Observation>,
}

impl QuarterlyTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.period.clone()).collect()
    }

    pub fn series_a(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.series_a).collect()
    }

    pub fn series_b(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.series_b).collect()
    }
}

/// Loads semicolon-delimited CSV files with a locale-configurable decimal
/// separator.
pub struct DataLoader {
    separator: u8,
    decimal_separator: char,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(b';', ',')
    }
}

impl DataLoader {
    pub fn new(separator: u8, decimal_separator: char) -> Self {
        Self {
            separator,
            decimal_separator,
        }
    }

    /// Load the input file and produce the cleaned, date-sorted table.
    ///
    /// The first three columns are `[period_label, series_a, series_b]`;
    /// any further columns are ignored. Rows with a missing or unparseable
    /// numeric value are dropped before date assignment.
    pub fn load(&self, file_path: &str) -> Result<QuarterlyTable, LoaderError> {
        // All columns are read as strings so numeric parsing stays under
        // our locale control.
        let df = LazyCsvReader::new(file_path)
            .with_separator(self.separator)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let columns = df.get_columns();
        if columns.len() < 3 {
            return Err(LoaderError::MissingColumns(columns.len()));
        }

        let period_col = columns[0].as_materialized_series();
        let a_col = columns[1].as_materialized_series();
        let b_col = columns[2].as_materialized_series();

        let mut rows: Vec<Observation> = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let (Ok(period), Ok(a), Ok(b)) = (period_col.get(i), a_col.get(i), b_col.get(i))
            else {
                continue;
            };
            if period.is_null() {
                continue;
            }

            // Missing or unparseable values drop the whole row; this happens
            // before date construction, so labels on dropped rows are never
            // validated.
            let (Some(series_a), Some(series_b)) = (self.parse_value(&a), self.parse_value(&b))
            else {
                dropped += 1;
                continue;
            };

            let period = period.to_string().trim_matches('"').to_string();
            let date = parse_period_label(&period)?;

            rows.push(Observation {
                period,
                date,
                series_a,
                series_b,
            });
        }

        if rows.is_empty() {
            return Err(LoaderError::EmptyDataset);
        }

        // Stable sort: unique period labels make ties impossible, but input
        // order is preserved if they ever occur.
        rows.sort_by_key(|r| r.date);

        debug!(rows = rows.len(), dropped, "loaded quarterly table");
        Ok(QuarterlyTable { rows })
    }

    fn parse_value(&self, value: &AnyValue) -> Option<f64> {
        if value.is_null() {
            return None;
        }
        let raw = value.to_string();
        let trimmed = raw.trim_matches('"').trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized: String = trimmed
            .chars()
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_and_sorts_rows() {
        let path = write_temp_csv(
            "cyclescope_loader_sorts.csv",
            "period;japan;south_africa\n\
             1994-Q2;100,5;50,2\n\
             1994-Q1;99,8;49,9\n\
             1994-Q3;101,1;50,8\n",
        );
        let table = DataLoader::default().load(path.to_str().unwrap()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.labels(), vec!["1994-Q1", "1994-Q2", "1994-Q3"]);
        assert_eq!(table.series_a(), vec![99.8, 100.5, 101.1]);
        assert_eq!(table.series_b(), vec![49.9, 50.2, 50.8]);
    }

    #[test]
    fn drops_rows_with_missing_values_preserving_order() {
        let path = write_temp_csv(
            "cyclescope_loader_missing.csv",
            "period;a;b\n\
             1994-Q1;100,0;50,0\n\
             1994-Q2;;50,5\n\
             1994-Q3;101,0;n/a\n\
             1994-Q4;102,0;51,0\n",
        );
        let table = DataLoader::default().load(path.to_str().unwrap()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.labels(), vec!["1994-Q1", "1994-Q4"]);
    }

    #[test]
    fn respects_configured_decimal_separator() {
        let path = write_temp_csv(
            "cyclescope_loader_dot.csv",
            "period;a;b\n1994-Q1;100.25;50.75\n1994-Q2;101.0;51.0\n",
        );
        let table = DataLoader::new(b';', '.')
            .load(path.to_str().unwrap())
            .unwrap();

        assert_eq!(table.series_a(), vec![100.25, 101.0]);
        assert_eq!(table.series_b(), vec![50.75, 51.0]);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let path = write_temp_csv(
            "cyclescope_loader_empty.csv",
            "period;a;b\n1994-Q1;;\n1994-Q2;x;y\n",
        );
        let err = DataLoader::default()
            .load(path.to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, LoaderError::EmptyDataset));
    }

    #[test]
    fn malformed_label_on_a_kept_row_is_an_error() {
        let path = write_temp_csv(
            "cyclescope_loader_label.csv",
            "period;a;b\n1994Q1;100,0;50,0\n",
        );
        let err = DataLoader::default()
            .load(path.to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, LoaderError::MalformedPeriodLabel(_)));
    }
}
