//! Trend re-weighting for decomposed forecasts.
//!
//! For each day of the forecast horizon, work out what the prediction would be
//! if the trend for every future day stayed exactly where it was on the very
//! first forecast day, while the seasonal/holiday/regressor effects still
//! apply at their modeled magnitude. The gap between that counterfactual and
//! the actual forecast is the trend's full contribution; a caller-supplied
//! multiplier scales that gap, so 0 means "no trend growth" and 1 means
//! "exactly as modeled", with every value in between a straight-line blend.
//!
//! The same algorithm runs independently over the point forecast and its
//! lower/upper uncertainty bounds, reading only within-band columns.

use crate::core::frame::ForecastFrame;
use crate::error::{Result, TrendDialError};

/// The three line variants a decomposed forecast carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// The point forecast.
    Point,
    /// The lower uncertainty bound.
    Lower,
    /// The upper uncertainty bound.
    Upper,
}

impl Band {
    /// All bands, in point/lower/upper order.
    pub const ALL: [Band; 3] = [Band::Point, Band::Lower, Band::Upper];

    /// Column-name suffix for this band.
    pub fn suffix(self) -> &'static str {
        match self {
            Band::Point => "",
            Band::Lower => "_lower",
            Band::Upper => "_upper",
        }
    }

    /// Column name for a base column in this band, e.g. `yhat_upper`.
    pub fn column(self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }
}

/// The nine columns the engine reads, all produced by the forecasting engine.
pub const SOURCE_COLUMNS: [&str; 9] = [
    "trend",
    "trend_lower",
    "trend_upper",
    "multiplicative_terms",
    "multiplicative_terms_lower",
    "multiplicative_terms_upper",
    "yhat",
    "yhat_lower",
    "yhat_upper",
];

/// How the uncertainty bounds respond to the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundMode {
    /// Each band is re-weighted independently from its own trend and
    /// multiplicative columns; the multiplier applies uniformly to all three.
    #[default]
    PerBand,
    /// The adjusted bounds keep the distance they had from the unadjusted
    /// point forecast, re-anchored onto the adjusted point forecast.
    FixedWidth,
}

/// Re-weight the trend of a decomposed forecast.
///
/// Appends, for each band suffix `s`:
///
/// - `zero_trend{s}`: the forecast with trend pinned at its first-day value,
///   `trend{s}[0] * (1 + multiplicative_terms{s})`;
/// - `trend_diff{s}`: `yhat{s} - zero_trend{s}`, the portion of the forecast
///   attributable to trend movement past the anchor day (negative when the
///   trend falls);
/// - `trend_diff_scaled{s}`: `trend_diff{s} * multiplier`;
/// - `adjusted{s}`: `zero_trend{s} + trend_diff_scaled{s}`.
///
/// The multiplier is not clamped: the formula is linear and total, and
/// restricting input to `[0, 1]` is the caller's policy. All nine
/// [`SOURCE_COLUMNS`] must be present before any row is processed. The
/// computation is pure; identical inputs yield bit-identical output.
pub fn reweight_trend(
    forecast: &ForecastFrame,
    multiplier: f64,
    mode: BoundMode,
) -> Result<ForecastFrame> {
    forecast.require_columns(SOURCE_COLUMNS)?;
    if forecast.is_empty() {
        return Err(TrendDialError::EmptyData);
    }

    let mut out = forecast.clone();

    for band in Band::ALL {
        let trend = out.column(&band.column("trend"))?;
        let terms = out.column(&band.column("multiplicative_terms"))?;
        let yhat = out.column(&band.column("yhat"))?;

        let first_trend = trend[0];
        let zero_trend: Vec<f64> = terms.iter().map(|t| first_trend * (1.0 + t)).collect();
        let trend_diff: Vec<f64> = yhat
            .iter()
            .zip(&zero_trend)
            .map(|(y, z)| y - z)
            .collect();
        let scaled: Vec<f64> = trend_diff.iter().map(|d| d * multiplier).collect();
        let adjusted: Vec<f64> = zero_trend
            .iter()
            .zip(&scaled)
            .map(|(z, s)| z + s)
            .collect();

        out.set_column(band.column("zero_trend"), zero_trend)?;
        out.set_column(band.column("trend_diff"), trend_diff)?;
        out.set_column(band.column("trend_diff_scaled"), scaled)?;
        out.set_column(band.column("adjusted"), adjusted)?;
    }

    if mode == BoundMode::FixedWidth {
        let adjusted = out.column("adjusted")?.to_vec();
        let yhat = out.column("yhat")?;
        let yhat_lower = out.column("yhat_lower")?;
        let yhat_upper = out.column("yhat_upper")?;

        let lower: Vec<f64> = adjusted
            .iter()
            .zip(yhat.iter().zip(yhat_lower))
            .map(|(a, (y, yl))| a - (y - yl))
            .collect();
        let upper: Vec<f64> = adjusted
            .iter()
            .zip(yhat.iter().zip(yhat_upper))
            .map(|(a, (y, yu))| a + (yu - y))
            .collect();

        out.set_column("adjusted_lower", lower)?;
        out.set_column("adjusted_upper", upper)?;
    }

    Ok(out)
}

/// Alias the adjusted columns back onto `yhat`/`yhat_lower`/`yhat_upper`.
///
/// Downstream charting and export read the `yhat` columns, so the adjusted
/// values replace them in place. Must run before any log reversal.
pub fn overlay_adjusted(frame: &mut ForecastFrame) -> Result<()> {
    for band in Band::ALL {
        let adjusted = frame.column(&band.column("adjusted"))?.to_vec();
        frame.set_column(band.column("yhat"), adjusted)?;
    }
    Ok(())
}
