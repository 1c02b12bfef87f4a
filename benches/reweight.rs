//! Benchmarks for the trend re-weighting hot path.
//!
//! Every slider move recomputes the adjustment, so this is the latency the
//! interactive layer sees per tick.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trend_dial::core::ForecastFrame;
use trend_dial::reweight::{reweight_trend, Band, BoundMode};

fn make_forecast(n: usize) -> ForecastFrame {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates = (0..n)
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect();
    let mut frame = ForecastFrame::new(dates);

    for band in Band::ALL {
        let shift = match band {
            Band::Point => 0.0,
            Band::Lower => -10.0,
            Band::Upper => 10.0,
        };
        let trend: Vec<f64> = (0..n).map(|i| 100.0 + shift + 0.5 * i as f64).collect();
        let terms: Vec<f64> = (0..n)
            .map(|i| 0.2 * (2.0 * std::f64::consts::PI * i as f64 / 365.25).sin())
            .collect();
        let yhat: Vec<f64> = trend
            .iter()
            .zip(&terms)
            .map(|(t, m)| t * (1.0 + m))
            .collect();
        frame.set_column(band.column("trend"), trend).unwrap();
        frame
            .set_column(band.column("multiplicative_terms"), terms)
            .unwrap();
        frame.set_column(band.column("yhat"), yhat).unwrap();
    }
    frame
}

fn bench_reweight(c: &mut Criterion) {
    let mut group = c.benchmark_group("reweight_trend");

    for size in [366, 1096, 3653, 10958].iter() {
        let forecast = make_forecast(*size);

        group.bench_with_input(BenchmarkId::new("per_band", size), size, |b, _| {
            b.iter(|| reweight_trend(black_box(&forecast), black_box(0.5), BoundMode::PerBand))
        });

        group.bench_with_input(BenchmarkId::new("fixed_width", size), size, |b, _| {
            b.iter(|| reweight_trend(black_box(&forecast), black_box(0.5), BoundMode::FixedWidth))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reweight);
criterion_main!(benches);
