//! Forecast HTTP client
//!
//! HTTP client for the dashboard backend's consumption forecast endpoint.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use domain::{BillCategory, ForecastSummary, Language};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiForecastResponse, Comparison, ConsumptionStats};

/// Forecast client errors
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Connection to the forecast service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the forecast service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the forecast service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Token missing, expired or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Forecast service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// API base URL including the version prefix (default: <http://localhost:8001/api/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token forwarded as-is; issuing it is not this client's job
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8001/api/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            auth_token: None,
        }
    }
}

impl fmt::Debug for ForecastConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Forecast for one language and bill category, plus the figures around it
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    /// What the voice summary speaks
    pub summary: ForecastSummary,
    /// Predicted cost of next month's bill
    pub forecast_cost: f64,
    /// Totals over all verified bills
    pub stats: ConsumptionStats,
    /// Month-over-month trend, if the backend had enough bills
    pub comparison: Option<Comparison>,
    /// Weather condition description
    pub weather_description: String,
}

/// Forecast provider port
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch the forecast for a language and bill category
    async fn get_forecast(
        &self,
        language: Language,
        category: BillCategory,
    ) -> Result<ForecastReport, ForecastError>;

    /// Check if the forecast service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Summary spoken when the live forecast cannot be fetched
///
/// Numbers are zero and the recommendation explains the failure in the
/// requested language.
pub fn unavailable_forecast(language: Language, category: BillCategory) -> ForecastSummary {
    let recommendation = match language {
        Language::English => "Unable to fetch live forecast. Please check connection.",
        Language::Telugu => {
            "ప్రత్యక్ష అంచనాను పొందడం సాధ్యం కాదు. దయచేసి కనెక్షన్‌ని తనిఖీ చేయండి."
        },
    };
    ForecastSummary::new(0.0, 0.0, 0.0, recommendation, language).with_bill_category(category)
}

/// Forecast API HTTP client implementation
#[derive(Debug)]
pub struct HttpForecastClient {
    client: Client,
    config: ForecastConfig,
}

impl HttpForecastClient {
    /// Create a new forecast client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ForecastConfig) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ForecastError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(ForecastConfig::default())
    }

    /// Build the forecast endpoint URL
    fn forecast_url(&self) -> String {
        format!(
            "{}/analysis/forecast",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Map a non-success status to an error
    fn status_error(status: StatusCode, body: &str) -> ForecastError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ForecastError::Unauthorized(format!("HTTP {status}"))
            },
            StatusCode::TOO_MANY_REQUESTS => ForecastError::RateLimitExceeded,
            s if s.is_server_error() => ForecastError::ServiceUnavailable(format!("HTTP {status}")),
            _ => ForecastError::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl ForecastClient for HttpForecastClient {
    #[instrument(skip(self), fields(lang = %language, bill_type = %category))]
    async fn get_forecast(
        &self,
        language: Language,
        category: BillCategory,
    ) -> Result<ForecastReport, ForecastError> {
        let url = self.forecast_url();
        debug!(url = %url, "Fetching consumption forecast");

        let mut request = self
            .client
            .get(&url)
            .query(&[("lang", language.code()), ("bill_type", category.as_str())]);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Forecast request rejected");
            return Err(Self::status_error(status, &body));
        }

        let api_response: ApiForecastResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ParseError(e.to_string()))?;

        let summary = api_response.to_summary(language, category);
        summary
            .validate()
            .map_err(|e| ForecastError::ParseError(e.to_string()))?;

        debug!(
            predicted_units = summary.predicted_units,
            temperature = summary.temperature,
            "Forecast received"
        );

        Ok(ForecastReport {
            summary,
            forecast_cost: api_response.forecast_cost,
            stats: api_response.stats,
            comparison: api_response.comparison,
            weather_description: api_response.current_weather.desc,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.get_forecast(Language::English, BillCategory::Electricity)
            .await
            .is_ok()
    }
}
