//! Log transform and its reversal for forecast columns.
//!
//! Fitting on the log of the target keeps predictions from going below zero
//! once mapped back; whether to do so is the caller's decision, made before
//! the forecasting engine is fitted. The reversal here must run after the
//! adjusted values have been aliased onto the `yhat` columns and before
//! anything is charted or exported, never earlier.

use crate::core::frame::ForecastFrame;
use crate::error::Result;

/// Natural log of a series, for transforming a target before fitting.
///
/// Non-positive input has no log; those entries map to NaN rather than
/// panicking, and upstream validation is the real guard against them.
pub fn log_transform(series: &[f64]) -> Vec<f64> {
    series
        .iter()
        .map(|&x| if x <= 0.0 { f64::NAN } else { x.ln() })
        .collect()
}

/// Reverse an earlier log transform on the named frame columns.
///
/// Applies `exp`, then clips at zero. The clip is a no-op for any finite
/// log-domain value (exp is always positive) and only matters for numerical
/// edge artifacts. Columns are checked up front; no column is modified unless
/// all of them exist.
pub fn transform_forecast<'a, I>(frame: &mut ForecastFrame, columns: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    frame.require_columns(columns.clone())?;
    for name in columns {
        let column = frame.column_mut(name)?;
        for value in column.iter_mut() {
            *value = value.exp().max(0.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrendDialError;
    use chrono::NaiveDate;

    fn frame_with(name: &str, values: Vec<f64>) -> ForecastFrame {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        let mut frame = ForecastFrame::new(dates);
        frame.set_column(name, values).unwrap();
        frame
    }

    #[test]
    fn log_round_trip_recovers_values() {
        let original = [1.0, 10.0, 100.0];
        let mut frame = frame_with("yhat", log_transform(&original));
        transform_forecast(&mut frame, ["yhat"]).unwrap();
        for (got, want) in frame.column("yhat").unwrap().iter().zip(original) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn clip_is_a_no_op_for_finite_log_input() {
        // exp of even a very negative log value is a small positive number.
        let mut frame = frame_with("yhat", vec![(0.0001_f64).ln()]);
        transform_forecast(&mut frame, ["yhat"]).unwrap();
        let value = frame.column("yhat").unwrap()[0];
        assert!(value > 0.0);
        assert!((value - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn clip_floors_negative_infinity_at_zero() {
        let mut frame = frame_with("yhat", vec![f64::NEG_INFINITY]);
        transform_forecast(&mut frame, ["yhat"]).unwrap();
        assert_eq!(frame.column("yhat").unwrap(), &[0.0]);
    }

    #[test]
    fn log_of_non_positive_is_nan() {
        let out = log_transform(&[-1.0, 0.0, 1.0]);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn missing_column_leaves_the_frame_untouched() {
        let mut frame = frame_with("yhat", vec![0.0]);
        let err = transform_forecast(&mut frame, ["yhat", "yhat_lower"]).unwrap_err();
        assert_eq!(
            err,
            TrendDialError::MissingForecastColumn("yhat_lower".into())
        );
        // yhat was not transformed.
        assert_eq!(frame.column("yhat").unwrap(), &[0.0]);
    }
}
