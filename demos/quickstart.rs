//! Quickstart: validate an upload, forecast with a stub engine, and sweep
//! the trend strength.
//!
//! Run with: cargo run --example quickstart

use chrono::NaiveDate;
use trend_dial::core::{ColumnRoles, Dataset, ForecastFrame, RawTable};
use trend_dial::error::{Result, TrendDialError};
use trend_dial::model::TrendModel;
use trend_dial::reweight::{Band, BoundMode};
use trend_dial::session::ForecastSession;

/// Stand-in for the real forecasting engine: straight-line trend through the
/// observed endpoints, no seasonal terms, fixed-offset bounds.
struct StraightLine {
    start: Option<(NaiveDate, f64)>,
    slope: f64,
}

impl TrendModel for StraightLine {
    fn fit(&mut self, historical: &Dataset) -> Result<()> {
        let first = historical.rows().first().ok_or(TrendDialError::EmptyData)?;
        let last = historical.rows().last().ok_or(TrendDialError::EmptyData)?;
        let (y0, y1) = (
            first.target.ok_or(TrendDialError::EmptyData)?,
            last.target.ok_or(TrendDialError::EmptyData)?,
        );
        let span = (last.date - first.date).num_days().max(1) as f64;
        self.slope = (y1 - y0) / span;
        self.start = Some((first.date, y0));
        Ok(())
    }

    fn predict(&self, future: &Dataset) -> Result<ForecastFrame> {
        let (origin, level) = self.start.ok_or(TrendDialError::FitRequired)?;
        let n = future.len();
        let mut frame = ForecastFrame::new(future.dates());
        for band in Band::ALL {
            let spread = match band {
                Band::Point => 0.0,
                Band::Lower => -5.0,
                Band::Upper => 5.0,
            };
            let trend: Vec<f64> = future
                .dates()
                .iter()
                .map(|d| level + spread + self.slope * (*d - origin).num_days() as f64)
                .collect();
            frame.set_column(band.column("yhat"), trend.clone())?;
            frame.set_column(band.column("multiplicative_terms"), vec![0.0; n])?;
            frame.set_column(band.column("trend"), trend)?;
        }
        Ok(frame)
    }

    fn name(&self) -> &str {
        "StraightLine"
    }

    fn is_fitted(&self) -> bool {
        self.start.is_some()
    }
}

fn main() -> Result<()> {
    // Ninety observed days of steady growth, thirty blank rows to forecast.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for i in 0..120 {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i);
        let target = if i < 90 {
            format!("{:.2}", 200.0 + 1.5 * i as f64)
        } else {
            String::new()
        };
        rows.push(vec![date.format("%Y-%m-%d").to_string(), target]);
    }
    let table = RawTable::new(vec!["date".into(), "visits".into()], rows)?;

    let mut session = ForecastSession::new(table, ColumnRoles::new("date", "visits"));
    session.check_data(|prompt| {
        println!("(confirm) {prompt}");
        true
    })?;

    let segments = session.segments().expect("data just checked");
    println!(
        "historical: {} rows, future: {} rows",
        segments.historical.len(),
        segments.future.len()
    );

    session.fit(Box::new(StraightLine {
        start: None,
        slope: 0.0,
    }))?;
    session.forecast()?;

    println!("\ntrend strength sweep (30-day totals):");
    for step in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let adjusted = session.adjust(step, BoundMode::PerBand)?;
        let total: f64 = adjusted.column("yhat")?.iter().sum();
        println!("  {:>4.0}% trend -> {total:.1}", step * 100.0);
    }

    let export = session.export(0.5, BoundMode::PerBand)?;
    println!("\nexport headers: {:?}", export.headers());
    let first_future = &export.rows()[90];
    println!(
        "first forecast row: {} -> {:.1}",
        first_future.date,
        first_future.forecast.expect("future row")
    );

    Ok(())
}
