//! Validated time-series data structures.

use crate::error::{Result, TrendDialError};
use chrono::NaiveDate;

/// One validated observation.
///
/// A `target` of `None` marks the row as "to forecast"; regressor values are
/// always present and aligned with the owning dataset's regressor names.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    /// Calendar date of the observation (no time-of-day).
    pub date: NaiveDate,
    /// Observed value, `None` for future rows.
    pub target: Option<f64>,
    /// Regressor values, one per declared regressor column.
    pub regressors: Vec<f64>,
}

impl SeriesRow {
    /// Create an observed (historical) row without regressors.
    pub fn observed(date: NaiveDate, target: f64) -> Self {
        Self {
            date,
            target: Some(target),
            regressors: Vec::new(),
        }
    }

    /// Create a to-forecast (future) row without regressors.
    pub fn future(date: NaiveDate) -> Self {
        Self {
            date,
            target: None,
            regressors: Vec::new(),
        }
    }
}

/// An ordered, validated sequence of observations.
///
/// Invariants, enforced at construction:
/// - dates strictly increasing (duplicates rejected);
/// - every row carries exactly one value per regressor name;
/// - once a row has a `None` target, all later rows do too.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    regressor_names: Vec<String>,
    rows: Vec<SeriesRow>,
}

impl Dataset {
    /// Create a dataset, validating all invariants.
    pub fn new(regressor_names: Vec<String>, rows: Vec<SeriesRow>) -> Result<Self> {
        for pair in rows.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(TrendDialError::UnorderedDates {
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
            if pair[1].date == pair[0].date {
                return Err(TrendDialError::DuplicateDate(pair[0].date));
            }
        }

        for row in &rows {
            if row.regressors.len() != regressor_names.len() {
                return Err(TrendDialError::DimensionMismatch {
                    expected: regressor_names.len(),
                    got: row.regressors.len(),
                });
            }
        }

        let mut empty_dates: Vec<NaiveDate> = Vec::new();
        for row in &rows {
            match row.target {
                None => empty_dates.push(row.date),
                Some(_) if !empty_dates.is_empty() => {
                    return Err(TrendDialError::GapInTargetData {
                        date: row.date,
                        missing_count: empty_dates.len(),
                        examples: empty_dates.into_iter().take(10).collect(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            regressor_names,
            rows,
        })
    }

    /// Create a dataset from rows with no regressors.
    pub fn from_rows(rows: Vec<SeriesRow>) -> Result<Self> {
        Self::new(Vec::new(), rows)
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the validated rows in date order.
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    /// Get the declared regressor names.
    pub fn regressor_names(&self) -> &[String] {
        &self.regressor_names
    }

    /// Get all dates in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Get all target values in order (`None` for future rows).
    pub fn targets(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.target).collect()
    }

    /// Get the values of a named regressor across all rows.
    pub fn regressor(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.regressor_names.iter().position(|n| n == name)?;
        Some(self.rows.iter().map(|r| r.regressors[idx]).collect())
    }

    /// First date in the dataset.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    /// Last date in the dataset.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }
}

/// A historical/future segment pair plus their concatenation.
///
/// Only ever produced by [`crate::segment::segment`]: `historical` has a value
/// in every target, `future` has none, and `combined` is the two in sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPair {
    /// Fully observed rows.
    pub historical: Dataset,
    /// To-be-forecast rows.
    pub future: Dataset,
    /// The full range, historical then future.
    pub combined: Dataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn accepts_contiguous_history_then_future() {
        let rows = vec![
            SeriesRow::observed(day(1), 10.0),
            SeriesRow::observed(day(2), 11.0),
            SeriesRow::future(day(3)),
            SeriesRow::future(day(4)),
        ];
        let ds = Dataset::from_rows(rows).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.first_date(), Some(day(1)));
        assert_eq!(ds.last_date(), Some(day(4)));
    }

    #[test]
    fn rejects_resumed_target_after_gap() {
        let rows = vec![
            SeriesRow::observed(day(1), 10.0),
            SeriesRow::future(day(2)),
            SeriesRow::observed(day(3), 12.0),
        ];
        let err = Dataset::from_rows(rows).unwrap_err();
        assert_eq!(
            err,
            TrendDialError::GapInTargetData {
                date: day(3),
                missing_count: 1,
                examples: vec![day(2)],
            }
        );
    }

    #[test]
    fn rejects_duplicate_dates() {
        let rows = vec![
            SeriesRow::observed(day(1), 10.0),
            SeriesRow::observed(day(1), 11.0),
        ];
        let err = Dataset::from_rows(rows).unwrap_err();
        assert_eq!(err, TrendDialError::DuplicateDate(day(1)));
    }

    #[test]
    fn rejects_mismatched_regressor_width() {
        let rows = vec![SeriesRow {
            date: day(1),
            target: Some(1.0),
            regressors: vec![0.5],
        }];
        let err = Dataset::new(vec!["a".into(), "b".into()], rows).unwrap_err();
        assert_eq!(
            err,
            TrendDialError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn regressor_lookup_by_name() {
        let rows = vec![
            SeriesRow {
                date: day(1),
                target: Some(1.0),
                regressors: vec![0.5],
            },
            SeriesRow {
                date: day(2),
                target: Some(2.0),
                regressors: vec![0.7],
            },
        ];
        let ds = Dataset::new(vec!["spend".into()], rows).unwrap();
        assert_eq!(ds.regressor("spend"), Some(vec![0.5, 0.7]));
        assert_eq!(ds.regressor("missing"), None);
    }
}
