//! Domain entities

mod forecast_summary;

pub use forecast_summary::ForecastSummary;
