//! Forecast API response models
//!
//! The backend answers `GET /analysis/forecast` with a loosely typed JSON
//! object; every field falls back to its zero value when absent, matching
//! what the dashboard does with a partial response.

use domain::{BillCategory, ForecastSummary, Language};
use serde::{Deserialize, Serialize};

/// Raw forecast endpoint response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiForecastResponse {
    /// Predicted consumption for next month
    #[serde(default)]
    pub forecast: f64,
    /// Predicted cost of next month's bill
    #[serde(default)]
    pub forecast_cost: f64,
    /// Recommendation text in the requested language
    #[serde(default)]
    pub recommendation: String,
    /// Weather the prediction was made with
    #[serde(default)]
    pub current_weather: CurrentWeather,
    /// Totals over all verified bills
    #[serde(default)]
    pub stats: ConsumptionStats,
    /// Month-over-month trend
    #[serde(default)]
    pub comparison: Option<Comparison>,
}

/// Weather snapshot reported with a forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in degrees Celsius
    #[serde(default)]
    pub temp: f64,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: f64,
    /// Short condition description ("Clear", "Rain", ...)
    #[serde(default)]
    pub desc: String,
}

/// Consumption totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionStats {
    /// Units (or kiloliters) consumed across all bills
    #[serde(default)]
    pub total_units: f64,
    /// Amount paid across all bills
    #[serde(default)]
    pub total_cost: f64,
}

/// Direction of consumption compared with the previous bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// More than 5% higher
    Up,
    /// More than 5% lower
    Down,
    /// Within 5%
    #[default]
    Stable,
}

/// Month-over-month comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Trend direction
    #[serde(default)]
    pub trend: Trend,
    /// Absolute change in percent
    #[serde(default)]
    pub percentage: f64,
}

impl ApiForecastResponse {
    /// Build the summary snapshot for the requested language and category
    pub fn to_summary(&self, language: Language, category: BillCategory) -> ForecastSummary {
        ForecastSummary::new(
            self.current_weather.temp,
            self.current_weather.humidity,
            self.forecast,
            self.recommendation.clone(),
            language,
        )
        .with_bill_category(category)
    }
}
