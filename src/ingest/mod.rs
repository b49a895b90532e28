//! External data sources.
//!
//! Submodules:
//! - `openweather` — live sea-surface temperature with fallback.
//! - `csv_records` — CSV files served as JSON records.

pub mod csv_records;
pub mod openweather;
