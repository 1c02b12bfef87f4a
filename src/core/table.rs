//! Raw uploaded table, exactly as the upload layer hands it over.

use crate::error::{Result, TrendDialError};

/// A cell is considered blank when it is empty after trimming whitespace.
pub(crate) fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// An uploaded table: named columns over rows of raw string cells.
///
/// No typing or validation has happened at this point; blank cells stand for
/// missing values. The segmenter consumes this together with [`ColumnRoles`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a table from column names and row cells.
    ///
    /// Every row must have exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(TrendDialError::DimensionMismatch {
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Get the column names in upload order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Get the raw cell at (row, column index).
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(|s| s.as_str())
    }

    /// Get all rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// The user's column-role selection for an uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Name of the date column.
    pub date: String,
    /// Name of the target metric column.
    pub target: String,
    /// Names of the regressor columns, possibly empty.
    pub regressors: Vec<String>,
}

impl ColumnRoles {
    /// Roles with no regressors.
    pub fn new(date: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            target: target.into(),
            regressors: Vec::new(),
        }
    }

    /// Add regressor columns.
    pub fn with_regressors<I, S>(mut self, regressors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regressors = regressors.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = RawTable::new(
            strings(&["ds", "y"]),
            vec![strings(&["2024-01-01", "1.0"]), strings(&["2024-01-02"])],
        );
        assert_eq!(
            result.unwrap_err(),
            TrendDialError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn cell_access_by_position() {
        let table = RawTable::new(
            strings(&["ds", "y"]),
            vec![strings(&["2024-01-01", "1.5"])],
        )
        .unwrap();
        assert_eq!(table.column_index("y"), Some(1));
        assert_eq!(table.cell(0, 1), Some("1.5"));
        assert_eq!(table.cell(1, 0), None);
    }

    #[test]
    fn blank_cells() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank("0"));
    }
}
