//! Trait seam for the external forecasting engine.

use crate::core::dataset::Dataset;
use crate::core::frame::ForecastFrame;
use crate::error::Result;

/// Interface the external forecasting engine is consumed through.
///
/// The engine is an opaque curve-fitter: it takes the historical segment
/// (with any regressor columns) and, once fitted, produces a decomposed
/// forecast over the future segment's dates. The frame it returns must carry
/// all of [`crate::reweight::SOURCE_COLUMNS`]; the re-weighting engine
/// re-checks that rather than trusting it.
///
/// This trait is object-safe and can be used with `Box<dyn TrendModel>`.
pub trait TrendModel {
    /// Fit the model to the historical segment.
    fn fit(&mut self, historical: &Dataset) -> Result<()>;

    /// Produce a decomposed forecast over the future segment's dates.
    ///
    /// Returns [`crate::TrendDialError::FitRequired`] when called before
    /// [`fit`](TrendModel::fit).
    fn predict(&self, future: &Dataset) -> Result<ForecastFrame>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed model trait objects.
pub type BoxedTrendModel = Box<dyn TrendModel>;
