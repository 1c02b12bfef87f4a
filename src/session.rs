//! Caller-held session state for one upload-to-export run.
//!
//! The interactive layer keeps exactly one of these per user session instead
//! of ambient global state: the uploaded table and column choices, the
//! validated segments, the fitted model, and the last decomposed forecast.
//! The core components stay pure functions; this struct only sequences them
//! and remembers their outputs between interactions.

use crate::core::dataset::{Dataset, SegmentPair, SeriesRow};
use crate::core::frame::ForecastFrame;
use crate::core::table::{ColumnRoles, RawTable};
use crate::error::{Result, TrendDialError};
use crate::export::ExportTable;
use crate::model::BoxedTrendModel;
use crate::reweight::{overlay_adjusted, reweight_trend, BoundMode};
use crate::segment::{prepare, PrepareOutcome};
use crate::transform::{log_transform, transform_forecast};

/// Outcome of the data check, surfaced to the caller's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCheck {
    /// All checks passed; segments are available and fitting may proceed.
    Passed,
    /// The user declined the ordering resort; nothing was stored.
    Declined,
}

/// Session state for one uploaded table.
pub struct ForecastSession {
    table: RawTable,
    roles: ColumnRoles,
    log_scale: bool,
    segments: Option<SegmentPair>,
    model: Option<BoxedTrendModel>,
    forecast: Option<ForecastFrame>,
}

impl ForecastSession {
    /// Start a session for an uploaded table and the user's column choices.
    pub fn new(table: RawTable, roles: ColumnRoles) -> Self {
        Self {
            table,
            roles,
            log_scale: false,
            segments: None,
            model: None,
            forecast: None,
        }
    }

    /// Fit on the log of the target and reverse the transform on adjust.
    ///
    /// Set this when forecasts must stay non-negative; the target is
    /// log-transformed before it reaches the model, and every adjusted
    /// forecast is mapped back through exp before it leaves the session.
    pub fn log_scale(mut self, on: bool) -> Self {
        self.log_scale = on;
        self
    }

    /// Whether the data check has passed for the current table.
    pub fn data_checked(&self) -> bool {
        self.segments.is_some()
    }

    /// The validated segments, once the data check has passed.
    pub fn segments(&self) -> Option<&SegmentPair> {
        self.segments.as_ref()
    }

    /// The last decomposed forecast, if one has been produced.
    pub fn last_forecast(&self) -> Option<&ForecastFrame> {
        self.forecast.as_ref()
    }

    /// Run the validation pipeline on the uploaded table.
    ///
    /// `confirm` is consulted once if the rows need resorting. On `Passed`
    /// the segments are stored and any previously fitted model or forecast
    /// is discarded, since it described different data.
    pub fn check_data<F>(&mut self, confirm: F) -> Result<DataCheck>
    where
        F: FnOnce(&str) -> bool,
    {
        match prepare(self.table.clone(), &self.roles, confirm)? {
            PrepareOutcome::Ready(pair) => {
                self.segments = Some(pair);
                self.model = None;
                self.forecast = None;
                Ok(DataCheck::Passed)
            }
            PrepareOutcome::Declined => Ok(DataCheck::Declined),
        }
    }

    /// Fit a forecasting model on the historical segment.
    ///
    /// With [`log_scale`](ForecastSession::log_scale) set, the model sees the
    /// log of the target instead of the raw values.
    pub fn fit(&mut self, mut model: BoxedTrendModel) -> Result<()> {
        let segments = self.segments.as_ref().ok_or(TrendDialError::CheckRequired)?;
        if self.log_scale {
            model.fit(&log_targets(&segments.historical)?)?;
        } else {
            model.fit(&segments.historical)?;
        }
        self.model = Some(model);
        self.forecast = None;
        Ok(())
    }

    /// Produce and store the decomposed forecast for the future segment.
    pub fn forecast(&mut self) -> Result<&ForecastFrame> {
        let segments = self.segments.as_ref().ok_or(TrendDialError::CheckRequired)?;
        let model = self.model.as_ref().ok_or(TrendDialError::FitRequired)?;
        let frame = model.predict(&segments.future)?;
        Ok(self.forecast.insert(frame))
    }

    /// Re-weight the stored forecast's trend and return the adjusted frame.
    ///
    /// Cheap enough to recompute on every interaction tick; the result is a
    /// pure function of (forecast, multiplier, mode), so recomputing for the
    /// same inputs always yields bit-identical output. The adjusted values
    /// are aliased onto the `yhat` columns, and with
    /// [`log_scale`](ForecastSession::log_scale) set they are mapped back to
    /// the input scale.
    pub fn adjust(&self, multiplier: f64, mode: BoundMode) -> Result<ForecastFrame> {
        let forecast = self.forecast.as_ref().ok_or(TrendDialError::FitRequired)?;
        let mut adjusted = reweight_trend(forecast, multiplier, mode)?;
        overlay_adjusted(&mut adjusted)?;
        if self.log_scale {
            transform_forecast(&mut adjusted, ["yhat", "yhat_lower", "yhat_upper"])?;
        }
        Ok(adjusted)
    }

    /// Build the downloadable table for a given trend strength.
    pub fn export(&self, multiplier: f64, mode: BoundMode) -> Result<ExportTable> {
        let segments = self.segments.as_ref().ok_or(TrendDialError::CheckRequired)?;
        let adjusted = self.adjust(multiplier, mode)?;
        ExportTable::build(&segments.historical, &adjusted, &self.roles)
    }
}

/// Copy of a dataset with the target mapped through the log transform.
fn log_targets(dataset: &Dataset) -> Result<Dataset> {
    let rows = dataset
        .rows()
        .iter()
        .map(|row| SeriesRow {
            date: row.date,
            target: row.target.map(|v| log_transform(&[v])[0]),
            regressors: row.regressors.clone(),
        })
        .collect();
    Dataset::new(dataset.regressor_names().to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrendModel;
    use crate::reweight::Band;

    /// Stub engine: continues the last level flat, no seasonal terms, bounds
    /// a fixed offset away. Enough structure for the session plumbing.
    struct FlatModel {
        level: Option<f64>,
    }

    impl FlatModel {
        fn new() -> Self {
            Self { level: None }
        }
    }

    impl TrendModel for FlatModel {
        fn fit(&mut self, historical: &Dataset) -> Result<()> {
            let last = historical
                .rows()
                .last()
                .and_then(|r| r.target)
                .ok_or(TrendDialError::EmptyData)?;
            self.level = Some(last);
            Ok(())
        }

        fn predict(&self, future: &Dataset) -> Result<ForecastFrame> {
            let level = self.level.ok_or(TrendDialError::FitRequired)?;
            let n = future.len();
            let mut frame = ForecastFrame::new(future.dates());
            for band in Band::ALL {
                let shift = match band {
                    Band::Point => 0.0,
                    Band::Lower => -1.0,
                    Band::Upper => 1.0,
                };
                frame.set_column(band.column("trend"), vec![level + shift; n])?;
                frame.set_column(band.column("multiplicative_terms"), vec![0.0; n])?;
                frame.set_column(band.column("yhat"), vec![level + shift; n])?;
            }
            Ok(frame)
        }

        fn name(&self) -> &str {
            "Flat"
        }

        fn is_fitted(&self) -> bool {
            self.level.is_some()
        }
    }

    fn uploaded() -> RawTable {
        RawTable::new(
            vec!["ds".into(), "y".into()],
            vec![
                vec!["2024-01-01".into(), "10.0".into()],
                vec!["2024-01-02".into(), "12.0".into()],
                vec!["2024-01-03".into(), String::new()],
                vec!["2024-01-04".into(), String::new()],
            ],
        )
        .unwrap()
    }

    fn no_confirm(_: &str) -> bool {
        panic!("ordered data must not prompt")
    }

    #[test]
    fn fit_requires_checked_data() {
        let mut session = ForecastSession::new(uploaded(), ColumnRoles::new("ds", "y"));
        let err = session.fit(Box::new(FlatModel::new())).unwrap_err();
        assert_eq!(err, TrendDialError::CheckRequired);
    }

    #[test]
    fn full_run_produces_an_export() {
        let mut session = ForecastSession::new(uploaded(), ColumnRoles::new("ds", "y"));
        assert_eq!(session.check_data(no_confirm).unwrap(), DataCheck::Passed);
        assert!(session.data_checked());

        session.fit(Box::new(FlatModel::new())).unwrap();
        assert_eq!(session.forecast().unwrap().horizon(), 2);

        let export = session.export(1.0, BoundMode::PerBand).unwrap();
        assert_eq!(export.rows().len(), 4);
        assert_eq!(export.rows()[2].forecast, Some(12.0));
    }

    #[test]
    fn adjust_before_forecast_is_an_error() {
        let mut session = ForecastSession::new(uploaded(), ColumnRoles::new("ds", "y"));
        session.check_data(no_confirm).unwrap();
        assert_eq!(
            session.adjust(0.5, BoundMode::PerBand).unwrap_err(),
            TrendDialError::FitRequired
        );
    }

    #[test]
    fn log_scale_round_trips_through_the_model() {
        let mut session =
            ForecastSession::new(uploaded(), ColumnRoles::new("ds", "y")).log_scale(true);
        session.check_data(no_confirm).unwrap();
        session.fit(Box::new(FlatModel::new())).unwrap();
        session.forecast().unwrap();

        // The model saw ln(12) and forecast it flat; adjust maps it back.
        let adjusted = session.adjust(1.0, BoundMode::PerBand).unwrap();
        let yhat = adjusted.column("yhat").unwrap();
        assert!((yhat[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn checking_again_discards_stale_model_and_forecast() {
        let mut session = ForecastSession::new(uploaded(), ColumnRoles::new("ds", "y"));
        session.check_data(no_confirm).unwrap();
        session.fit(Box::new(FlatModel::new())).unwrap();
        session.forecast().unwrap();

        session.check_data(no_confirm).unwrap();
        assert!(session.last_forecast().is_none());
        assert_eq!(
            session.adjust(1.0, BoundMode::PerBand).unwrap_err(),
            TrendDialError::FitRequired
        );
    }
}
