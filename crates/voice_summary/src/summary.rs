//! Summary text
//!
//! English summaries interpolate digits; Telugu summaries speak every number
//! as words so the synthesis voice does not read digits in English.

use domain::{BillCategory, ForecastSummary, Language};

use crate::numerals::localize_in;

/// Builds the spoken summary for a forecast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryComposer {
    city_en: String,
    city_te: String,
}

impl Default for SummaryComposer {
    fn default() -> Self {
        Self::new("Hyderabad", "హైదరాబాద్")
    }
}

/// Nearest integer, saturating for values outside `i64`
#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

impl SummaryComposer {
    /// Composer for a city named `city_en` in English and `city_te` in Telugu
    pub fn new(city_en: impl Into<String>, city_te: impl Into<String>) -> Self {
        Self {
            city_en: city_en.into(),
            city_te: city_te.into(),
        }
    }

    /// Summary text in the forecast's language
    #[must_use]
    pub fn compose(&self, forecast: &ForecastSummary) -> String {
        match forecast.language {
            Language::English => self.compose_english(forecast),
            Language::Telugu => self.compose_telugu(forecast),
        }
    }

    fn compose_english(&self, forecast: &ForecastSummary) -> String {
        let (utility, unit) = match forecast.bill_category {
            BillCategory::Electricity => ("electricity", "units"),
            BillCategory::Water => ("water", "kiloliters"),
        };

        let mut text = format!(
            "Current weather in {} is {} degrees Celsius with {} percent humidity. \
             Your forecasted {utility} consumption for next month is {} {unit}.",
            self.city_en,
            round(forecast.temperature),
            round(forecast.humidity),
            round(forecast.predicted_units),
        );
        push_recommendation(&mut text, "Recommendation", &forecast.recommendation_text);
        text
    }

    fn compose_telugu(&self, forecast: &ForecastSummary) -> String {
        let (utility, unit) = match forecast.bill_category {
            BillCategory::Electricity => ("విద్యుత్", "యూనిట్లు"),
            BillCategory::Water => ("నీటి", "కిలోలీటర్లు"),
        };
        let words = |value: f64| localize_in(round(value), Language::Telugu);

        let mut text = format!(
            "{}\u{200c}లో ప్రస్తుత వాతావరణం {} డిగ్రీల సెల్సియస్, తేమ {} శాతం. \
             వచ్చే నెల మీ {utility} వినియోగ అంచనా {} {unit}.",
            self.city_te,
            words(forecast.temperature),
            words(forecast.humidity),
            words(forecast.predicted_units),
        );
        push_recommendation(&mut text, "సూచన", &forecast.recommendation_text);
        text
    }
}

fn push_recommendation(text: &mut String, label: &str, recommendation: &str) {
    let recommendation = recommendation.trim();
    if !recommendation.is_empty() {
        text.push_str(&format!(" {label}: {recommendation}"));
    }
}
