//! Input validation and historical/future segmentation.
//!
//! Turns a raw uploaded table plus column-role selections into a validated
//! [`SegmentPair`], or fails with one specific, user-actionable error. Stages
//! run in a fixed order: column-name validation, date parsing, ordering check
//! (with an explicit user confirmation before any resort), then a single
//! forward scan that splits the rows into historical and future segments.
//!
//! Every stage is atomic: it returns fully valid output or one error, never a
//! partial segment pair.

use crate::core::dataset::{Dataset, SegmentPair, SeriesRow};
use crate::core::table::{is_blank, ColumnRoles, RawTable};
use crate::error::{Result, TrendDialError};
use chrono::{Duration, NaiveDate};

/// Number of future days synthesized when the upload has no blank-target rows.
pub const DEFAULT_HORIZON_DAYS: usize = 1096;

/// Strict date format required of every date cell.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message passed to the confirmation callback before an auto-sort.
pub const REORDER_PROMPT: &str =
    "The uploaded data is not in date order. Reorder it by date and continue?";

/// Reject tables with non-unique column names before any further processing.
pub fn validate_column_names(table: &RawTable) -> Result<()> {
    let mut duplicates: Vec<String> = Vec::new();
    for (i, name) in table.columns().iter().enumerate() {
        if table.columns()[..i].contains(name) && !duplicates.contains(name) {
            duplicates.push(name.clone());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(TrendDialError::DuplicateColumns(duplicates))
    }
}

/// An uploaded table with its date column parsed.
///
/// Blank date cells stay `None` here; they are reported as
/// [`TrendDialError::MissingDate`] with their row number during [`segment`],
/// so the error can point at the row that actually carries data.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    dates: Vec<Option<NaiveDate>>,
}

impl DatedTable {
    /// Get the parsed date axis, `None` for blank cells.
    pub fn dates(&self) -> &[Option<NaiveDate>] {
        &self.dates
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TrendDialError::UnknownColumn(name.to_string()))
    }

    /// Dates strictly increasing, with no blanks.
    fn is_ordered(&self) -> bool {
        if self.dates.iter().any(|d| d.is_none()) {
            return false;
        }
        self.dates.windows(2).all(|pair| pair[0] < pair[1])
    }
}

/// Parse the designated date column of an uploaded table.
///
/// Every non-blank cell must match [`DATE_FORMAT`] exactly; the first failure
/// aborts with [`TrendDialError::BadDateFormat`] naming the offending value.
pub fn parse_date_column(table: RawTable, roles: &ColumnRoles) -> Result<DatedTable> {
    let date_idx = table
        .column_index(&roles.date)
        .ok_or_else(|| TrendDialError::UnknownColumn(roles.date.clone()))?;

    let columns = table.columns().to_vec();
    let rows = table.into_rows();

    let mut dates = Vec::with_capacity(rows.len());
    for row in &rows {
        let cell = row[date_idx].trim();
        if cell.is_empty() {
            dates.push(None);
        } else {
            let date = NaiveDate::parse_from_str(cell, DATE_FORMAT).map_err(|_| {
                TrendDialError::BadDateFormat {
                    column: roles.date.clone(),
                    value: cell.to_string(),
                }
            })?;
            dates.push(Some(date));
        }
    }

    Ok(DatedTable {
        columns,
        rows,
        dates,
    })
}

/// Result of the ordering check.
///
/// A declined resort is a normal user choice, not an error, so it gets its own
/// arm instead of overloading the error channel.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderingOutcome {
    /// Dates were already strictly increasing, or the user approved a resort.
    Proceed(DatedTable),
    /// The user declined the resort; the caller must abort the pipeline.
    Declined,
}

/// Check that rows are in strictly increasing date order.
///
/// If they are, the table passes through untouched and `confirm` is never
/// invoked. Otherwise `confirm` is asked once with [`REORDER_PROMPT`]; on
/// approval the rows are stably sorted ascending by date (blank dates last,
/// original relative order preserved among ties) with the original row
/// numbering discarded.
pub fn check_order<F>(dated: DatedTable, confirm: F) -> OrderingOutcome
where
    F: FnOnce(&str) -> bool,
{
    if dated.is_ordered() {
        return OrderingOutcome::Proceed(dated);
    }

    if !confirm(REORDER_PROMPT) {
        return OrderingOutcome::Declined;
    }

    let DatedTable {
        columns,
        rows,
        dates,
    } = dated;

    let mut paired: Vec<(Option<NaiveDate>, Vec<String>)> = dates.into_iter().zip(rows).collect();
    paired.sort_by_key(|(date, _)| (date.is_none(), *date));
    let (dates, rows) = paired.into_iter().unzip();

    OrderingOutcome::Proceed(DatedTable {
        columns,
        rows,
        dates,
    })
}

fn parse_number(cell: &str, column: &str) -> Result<f64> {
    let cell = cell.trim();
    cell.parse::<f64>()
        .map_err(|_| TrendDialError::InvalidNumber {
            column: column.to_string(),
            value: cell.to_string(),
        })
}

/// Split a date-ordered table into historical and future segments.
///
/// One forward scan over the rows, carrying the empty-target dates seen so
/// far. Per row, in order: a blank date is fatal, a blank regressor cell is
/// fatal, a blank target records the date as empty, and a populated target
/// after any empty date is fatal (no "gap then resumed data" patterns).
///
/// If at least one blank-target row exists, those rows become the future
/// segment. Otherwise the future is synthesized as [`DEFAULT_HORIZON_DAYS`]
/// consecutive days following the last historical date, which is only legal
/// when no regressors are declared: the engine cannot guess future regressor
/// values, so the user must supply those rows explicitly.
pub fn segment(dated: &DatedTable, roles: &ColumnRoles) -> Result<SegmentPair> {
    if dated.is_empty() {
        return Err(TrendDialError::EmptyData);
    }

    let target_idx = dated.column_index(&roles.target)?;
    let regressor_idxs: Vec<usize> = roles
        .regressors
        .iter()
        .map(|name| dated.column_index(name))
        .collect::<Result<_>>()?;

    let mut historical: Vec<SeriesRow> = Vec::new();
    let mut future: Vec<SeriesRow> = Vec::new();
    let mut empty_dates: Vec<NaiveDate> = Vec::new();

    for (row_idx, row) in dated.rows.iter().enumerate() {
        let date = dated.dates[row_idx].ok_or_else(|| TrendDialError::MissingDate {
            column: roles.date.clone(),
            row: row_idx,
        })?;

        let mut regressors = Vec::with_capacity(regressor_idxs.len());
        for (name, &idx) in roles.regressors.iter().zip(&regressor_idxs) {
            let cell = &row[idx];
            if is_blank(cell) {
                return Err(TrendDialError::MissingRegressorValue {
                    column: name.clone(),
                    date,
                });
            }
            regressors.push(parse_number(cell, name)?);
        }

        let target_cell = &row[target_idx];
        if is_blank(target_cell) {
            empty_dates.push(date);
            future.push(SeriesRow {
                date,
                target: None,
                regressors,
            });
        } else {
            let value = parse_number(target_cell, &roles.target)?;
            if !empty_dates.is_empty() {
                return Err(TrendDialError::GapInTargetData {
                    date,
                    missing_count: empty_dates.len(),
                    examples: empty_dates.into_iter().take(10).collect(),
                });
            }
            historical.push(SeriesRow {
                date,
                target: Some(value),
                regressors,
            });
        }
    }

    if historical.is_empty() {
        return Err(TrendDialError::EmptyData);
    }

    if future.is_empty() {
        if !roles.regressors.is_empty() {
            return Err(TrendDialError::RegressorsRequireExplicitFutureRows(
                roles.regressors.clone(),
            ));
        }
        let last_date = historical.last().expect("historical is non-empty").date;
        future = (1..=DEFAULT_HORIZON_DAYS)
            .map(|offset| SeriesRow::future(last_date + Duration::days(offset as i64)))
            .collect();
    }

    let names = roles.regressors.clone();
    let combined_rows: Vec<SeriesRow> = historical.iter().chain(future.iter()).cloned().collect();

    Ok(SegmentPair {
        historical: Dataset::new(names.clone(), historical)?,
        future: Dataset::new(names.clone(), future)?,
        combined: Dataset::new(names, combined_rows)?,
    })
}

/// Result of the full preparation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PrepareOutcome {
    /// All checks passed; this is the "data checked" success signal.
    Ready(SegmentPair),
    /// The user declined the ordering resort; the pipeline was aborted.
    Declined,
}

/// Run the whole validation pipeline on an uploaded table.
///
/// Column-name validation, date parsing, the ordering check (asking `confirm`
/// before any resort), and segmentation, in that order. A `Ready` outcome is
/// the success signal the caller's state machine consumes; any failure along
/// the way surfaces as the specific error of the stage that found it.
pub fn prepare<F>(table: RawTable, roles: &ColumnRoles, confirm: F) -> Result<PrepareOutcome>
where
    F: FnOnce(&str) -> bool,
{
    validate_column_names(&table)?;
    let dated = parse_date_column(table, roles)?;
    match check_order(dated, confirm) {
        OrderingOutcome::Declined => Ok(PrepareOutcome::Declined),
        OrderingOutcome::Proceed(dated) => Ok(PrepareOutcome::Ready(segment(&dated, roles)?)),
    }
}
