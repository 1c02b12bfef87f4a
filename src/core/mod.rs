//! Core data structures: uploaded tables, validated datasets, forecast frames.

pub mod dataset;
pub mod frame;
pub mod table;

pub use dataset::{Dataset, SegmentPair, SeriesRow};
pub use frame::ForecastFrame;
pub use table::{ColumnRoles, RawTable};
