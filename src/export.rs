//! Export table with the fixed column-renaming contract.

use crate::core::dataset::Dataset;
use crate::core::frame::ForecastFrame;
use crate::core::table::ColumnRoles;
use crate::error::Result;
use chrono::NaiveDate;

/// One export row: historical rows carry only `actual`, future rows carry
/// only the forecast values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

/// The downloadable forecast: historical actuals followed by the adjusted
/// forecast, under the caller's original column names.
///
/// The header contract is fixed for output-file compatibility:
/// `{date_col}`, `{target_col}`, `{target_col}_forecast`,
/// `{target_col}_upper`, `{target_col}_lower`, in that order, where the
/// last three are the frame's `yhat`, `yhat_upper`, and `yhat_lower`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    headers: [String; 5],
    rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Assemble the export from the historical segment and the adjusted
    /// forecast frame.
    ///
    /// The frame is read after [`crate::reweight::overlay_adjusted`] (and any
    /// log reversal), so its `yhat` columns already hold the adjusted values.
    pub fn build(
        historical: &Dataset,
        adjusted: &ForecastFrame,
        roles: &ColumnRoles,
    ) -> Result<Self> {
        let yhat = adjusted.column("yhat")?;
        let yhat_upper = adjusted.column("yhat_upper")?;
        let yhat_lower = adjusted.column("yhat_lower")?;

        let mut rows = Vec::with_capacity(historical.len() + adjusted.horizon());
        for row in historical.rows() {
            rows.push(ExportRow {
                date: row.date,
                actual: row.target,
                forecast: None,
                upper: None,
                lower: None,
            });
        }
        for (i, &date) in adjusted.dates().iter().enumerate() {
            rows.push(ExportRow {
                date,
                actual: None,
                forecast: Some(yhat[i]),
                upper: Some(yhat_upper[i]),
                lower: Some(yhat_lower[i]),
            });
        }

        Ok(Self {
            headers: [
                roles.date.clone(),
                roles.target.clone(),
                format!("{}_forecast", roles.target),
                format!("{}_upper", roles.target),
                format!("{}_lower", roles.target),
            ],
            rows,
        })
    }

    /// The five column headers, in export order.
    pub fn headers(&self) -> &[String; 5] {
        &self.headers
    }

    /// All rows, historical first.
    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }
}
