//! Forecast summary entity
//!
//! Snapshot of what the forecast provider returned for one
//! `(language, bill category)` pair. The voice summary treats it as
//! immutable input.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{BillCategory, Language};

/// Forecast values the spoken summary is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Current temperature in degrees Celsius
    pub temperature: f64,
    /// Current relative humidity in percent
    pub humidity: f64,
    /// Predicted consumption for next month (units or kiloliters)
    pub predicted_units: f64,
    /// Recommendation text, already in `language`
    pub recommendation_text: String,
    /// Language the summary is composed in
    #[serde(rename = "language_tag")]
    pub language: Language,
    /// Utility the forecast is for
    #[serde(default)]
    pub bill_category: BillCategory,
}

impl ForecastSummary {
    /// Create a forecast summary for the electricity category
    pub fn new(
        temperature: f64,
        humidity: f64,
        predicted_units: f64,
        recommendation_text: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            temperature,
            humidity,
            predicted_units,
            recommendation_text: recommendation_text.into(),
            language,
            bill_category: BillCategory::default(),
        }
    }

    /// Set the bill category
    #[must_use]
    pub const fn with_bill_category(mut self, bill_category: BillCategory) -> Self {
        self.bill_category = bill_category;
        self
    }

    /// Check that all numeric values are usable
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` for non-finite numbers,
    /// humidity outside 0-100 or negative predicted consumption.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("predicted_units", self.predicted_units),
        ] {
            if !value.is_finite() {
                return Err(DomainError::validation(format!("{name} is not a finite number")));
            }
        }

        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(DomainError::validation(format!(
                "humidity {} is out of range (must be 0-100)",
                self.humidity
            )));
        }

        if self.predicted_units < 0.0 {
            return Err(DomainError::validation(format!(
                "predicted_units {} must not be negative",
                self.predicted_units
            )));
        }

        Ok(())
    }
}
