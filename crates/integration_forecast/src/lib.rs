//! Consumption forecast integration
//!
//! Client for the dashboard backend's forecast endpoint. Produces the
//! [`domain::ForecastSummary`] snapshot the voice summary is spoken from.

pub mod client;
mod models;

pub use client::{
    ForecastClient, ForecastConfig, ForecastError, ForecastReport, HttpForecastClient,
    unavailable_forecast,
};
pub use models::{Comparison, ConsumptionStats, CurrentWeather, Trend};
