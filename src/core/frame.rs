//! Column-keyed forecast table over a date axis.

use crate::error::{Result, TrendDialError};
use chrono::NaiveDate;

/// A table of named `f64` columns sharing one date axis.
///
/// This is the shape the external forecasting engine produces (trend,
/// multiplicative terms, and final forecast for point/lower/upper) and the
/// shape the re-weighting engine appends its derived columns to. Columns keep
/// insertion order; every column has exactly one value per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastFrame {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    /// Values stored in column-major format: columns[column][row]
    columns: Vec<Vec<f64>>,
}

impl ForecastFrame {
    /// Create an empty frame over the given date axis.
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Get the forecast horizon (number of rows).
    pub fn horizon(&self) -> usize {
        self.dates.len()
    }

    /// Check if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Get the date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Get the column names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check whether a named column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Get a named column.
    ///
    /// Returns [`TrendDialError::MissingForecastColumn`] when absent.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| TrendDialError::MissingForecastColumn(name.to_string()))
    }

    /// Get a mutable reference to a named column.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut [f64]> {
        match self.names.iter().position(|n| n == name) {
            Some(i) => Ok(self.columns[i].as_mut_slice()),
            None => Err(TrendDialError::MissingForecastColumn(name.to_string())),
        }
    }

    /// Insert or replace a named column.
    ///
    /// The values must have one entry per date on the frame's axis.
    pub fn set_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.dates.len() {
            return Err(TrendDialError::DimensionMismatch {
                expected: self.dates.len(),
                got: values.len(),
            });
        }
        let name = name.into();
        match self.names.iter().position(|n| n == &name) {
            Some(i) => self.columns[i] = values,
            None => {
                self.names.push(name);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Require that every named column is present, before any row is touched.
    pub fn require_columns<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            if !self.has_column(name) {
                return Err(TrendDialError::MissingForecastColumn(name.to_string()));
            }
        }
        Ok(())
    }
}
