//! # trend-dial
//!
//! Validate and segment an uploaded time series, then re-weight the trend of
//! a decomposed forecast while preserving its seasonal structure.
//!
//! Fitted forecasts can lean too hard on past trends. This crate takes the
//! decomposed output of an external forecasting engine (trend, multiplicative
//! terms, and final forecast for the point line and both uncertainty bounds),
//! computes the counterfactual forecast where trend stays pinned at its
//! first-day value, and lets the caller blend between that and the fully
//! modeled forecast with a single strength multiplier.
//!
//! Two core components, consumed in sequence:
//!
//! - [`segment`]: validates an uploaded table, parses and orders its date
//!   axis, and splits it into historical and future segments (synthesizing
//!   the future when none is supplied);
//! - [`reweight`]: the trend re-weighting engine itself.
//!
//! Around them: [`model`] is the trait seam the external forecasting engine
//! is consumed through, [`transform`] reverses a pre-fit log transform,
//! [`export`] applies the output column-renaming contract, and [`session`]
//! holds the caller's cross-interaction state explicitly.

pub mod core;
pub mod error;
pub mod export;
pub mod model;
pub mod reweight;
pub mod segment;
pub mod session;
pub mod transform;

pub use error::{Result, TrendDialError};

pub mod prelude {
    pub use crate::core::{ColumnRoles, Dataset, ForecastFrame, RawTable, SegmentPair, SeriesRow};
    pub use crate::error::{Result, TrendDialError};
    pub use crate::export::ExportTable;
    pub use crate::model::{BoxedTrendModel, TrendModel};
    pub use crate::reweight::{reweight_trend, Band, BoundMode};
    pub use crate::segment::{prepare, PrepareOutcome};
    pub use crate::session::{DataCheck, ForecastSession};
}
