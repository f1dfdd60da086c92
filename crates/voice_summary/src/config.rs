//! Configuration for the voice summary

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the voice summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSummaryConfig {
    /// Base URL of the audio rendering service (serves `/tts/speak`)
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,

    /// Timeout for fetching rendered audio in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// How long to wait for the host voice list in milliseconds
    #[serde(default = "default_voice_catalog_timeout_ms")]
    pub voice_catalog_timeout_ms: u64,

    /// Speaking rate for local synthesis (1.0 is normal speed)
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,

    /// City named in English summaries
    #[serde(default = "default_city")]
    pub city: String,

    /// City named in Telugu summaries
    #[serde(default = "default_city_te")]
    pub city_te: String,
}

fn default_tts_base_url() -> String {
    "http://localhost:8001".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_voice_catalog_timeout_ms() -> u64 {
    3000
}

const fn default_speech_rate() -> f32 {
    0.85
}

fn default_city() -> String {
    "Hyderabad".to_string()
}

fn default_city_te() -> String {
    "హైదరాబాద్".to_string()
}

impl Default for VoiceSummaryConfig {
    fn default() -> Self {
        Self {
            tts_base_url: default_tts_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            voice_catalog_timeout_ms: default_voice_catalog_timeout_ms(),
            speech_rate: default_speech_rate(),
            city: default_city(),
            city_te: default_city_te(),
        }
    }
}

impl VoiceSummaryConfig {
    /// Load from an optional `voice_summary.{toml,json,...}` file in the
    /// working directory, overridden by `VOICE_SUMMARY_*` environment
    /// variables (e.g. `VOICE_SUMMARY_SPEECH_RATE=0.9`)
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("voice_summary")
    }

    /// Like [`Self::load`] with a different file name (extension optional)
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("VOICE_SUMMARY").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_base_url.trim().is_empty() {
            return Err("TTS base URL must not be empty".to_string());
        }

        if !(0.1..=10.0).contains(&self.speech_rate) {
            return Err(format!(
                "Speech rate must be between 0.1 and 10.0, got {}",
                self.speech_rate
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.voice_catalog_timeout_ms == 0 {
            return Err("Voice catalog timeout must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Rendered-audio request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Voice list population timeout
    #[must_use]
    pub const fn voice_catalog_timeout(&self) -> Duration {
        Duration::from_millis(self.voice_catalog_timeout_ms)
    }
}
