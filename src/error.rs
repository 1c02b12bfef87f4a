//! Error types for the trend-dial library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for trend-dial operations.
pub type Result<T> = std::result::Result<T, TrendDialError>;

/// Errors that can occur while validating uploads or re-weighting forecasts.
///
/// Every variant is fatal to the current pipeline run: no stage retries,
/// coerces, or drops bad rows, and no partial output accompanies an error.
/// Messages carry the offending values so the caller can display them verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendDialError {
    /// Uploaded table has non-unique column names.
    #[error("duplicate column names in uploaded data: {0:?}")]
    DuplicateColumns(Vec<String>),

    /// A date cell failed strict year-month-day parsing.
    #[error("could not read {value:?} in date column {column:?}: dates must be in YYYY-MM-DD format")]
    BadDateFormat { column: String, value: String },

    /// A row exists but its date cell is blank.
    #[error("row {row} has data but no value in date column {column:?}")]
    MissingDate { column: String, row: usize },

    /// A declared regressor column is blank on some row.
    #[error("regressor column {column:?} has no value for {date}: regressors must be filled for every row, historical and future")]
    MissingRegressorValue { column: String, date: NaiveDate },

    /// A populated target value appears after one or more blank target values.
    #[error("target has a value for {date} but is missing values for {missing_count} earlier dates (examples: {examples:?})")]
    GapInTargetData {
        date: NaiveDate,
        missing_count: usize,
        examples: Vec<NaiveDate>,
    },

    /// Regressors were declared but no trailing blank-target rows exist.
    #[error("regressor columns {0:?} require explicit future rows: add a row for every date to forecast, with the date and regressors filled and the target blank")]
    RegressorsRequireExplicitFutureRows(Vec<String>),

    /// Decomposed forecast table lacks a required column.
    #[error("forecast table is missing required column {0:?}")]
    MissingForecastColumn(String),

    /// A selected column does not exist in the uploaded table.
    #[error("column {0:?} does not exist in the uploaded data")]
    UnknownColumn(String),

    /// A numeric cell failed to parse.
    #[error("could not read {value:?} in column {column:?} as a number")]
    InvalidNumber { column: String, value: String },

    /// Two rows share the same date.
    #[error("duplicate date {0}: each row must have a unique date")]
    DuplicateDate(NaiveDate),

    /// Rows are not in ascending date order.
    #[error("dates are out of order: {date} appears after {previous}")]
    UnorderedDates { date: NaiveDate, previous: NaiveDate },

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Data has not passed validation yet.
    #[error("data must be checked before fitting")]
    CheckRequired,
}
