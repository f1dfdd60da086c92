//! Server-rendered fallback audio
//!
//! Fetches `GET {tts_base_url}/tts/speak?text=..&lang=..` and hands the
//! bytes to the host audio output. Failures are reported once and never
//! retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::config::VoiceSummaryConfig;
use crate::error::{FallbackPlaybackError, SpeechError};
use crate::events::PlaybackReporter;
use crate::ports::{AudioOutput, FallbackHandle, FallbackPlayer};
use crate::types::{AudioData, AudioFormat};

/// Fallback player backed by the dashboard's audio rendering service
#[derive(Clone)]
pub struct RemoteAudioPlayer {
    client: Client,
    base_url: String,
    timeout_ms: u64,
    output: Arc<dyn AudioOutput>,
}

impl std::fmt::Debug for RemoteAudioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAudioPlayer")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl RemoteAudioPlayer {
    /// Create a player for the service configured in `config`
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(
        config: &VoiceSummaryConfig,
        output: Arc<dyn AudioOutput>,
    ) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.tts_base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
            output,
        })
    }

    /// Build the rendering endpoint URL
    fn speak_url(&self) -> String {
        format!("{}/tts/speak", self.base_url)
    }

    /// Classify a transport error, reporting timeouts with the configured limit
    fn request_error(&self, err: reqwest::Error) -> FallbackPlaybackError {
        if err.is_timeout() {
            FallbackPlaybackError::Timeout(self.timeout_ms)
        } else {
            err.into()
        }
    }

    /// Fetch rendered audio for `(text, language_tag)`
    ///
    /// # Errors
    ///
    /// Network failures and non-success statuses are network errors; a
    /// non-audio `Content-Type` or an empty body is `InvalidAudio`.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn fetch_audio(
        &self,
        text: &str,
        language_tag: &str,
    ) -> Result<AudioData, FallbackPlaybackError> {
        debug!("Requesting rendered audio");

        let response = self
            .client
            .get(self.speak_url())
            .query(&[("text", text), ("lang", language_tag)])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FallbackPlaybackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let format = match response.headers().get(CONTENT_TYPE) {
            None => AudioFormat::Mp3,
            Some(value) => {
                let mime = value.to_str().unwrap_or_default();
                AudioFormat::from_mime_type(mime).ok_or_else(|| {
                    FallbackPlaybackError::InvalidAudio(format!(
                        "unexpected content type '{mime}'"
                    ))
                })?
            },
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(e))?;
        if bytes.is_empty() {
            return Err(FallbackPlaybackError::InvalidAudio(
                "response body is empty".to_string(),
            ));
        }

        debug!(audio_size = bytes.len(), ?format, "Rendered audio received");
        Ok(AudioData::new(bytes, format))
    }

    async fn fetch_and_play(
        &self,
        text: &str,
        language_tag: &str,
    ) -> Result<(), FallbackPlaybackError> {
        let audio = self.fetch_audio(text, language_tag).await?;
        self.output.play(audio).await
    }
}

impl FallbackPlayer for RemoteAudioPlayer {
    fn play(&self, text: &str, language_tag: &str, reporter: PlaybackReporter) -> FallbackHandle {
        let cancelled = Arc::new(AtomicBool::new(false));

        let player = self.clone();
        let text = text.to_string();
        let language_tag = language_tag.to_string();
        let task_cancelled = Arc::clone(&cancelled);

        let task = tokio::spawn(async move {
            let result = player.fetch_and_play(&text, &language_tag).await;

            if task_cancelled.load(Ordering::SeqCst) {
                debug!(session = %reporter.session(), "Fallback playback cancelled");
                return;
            }

            match result {
                Ok(()) => reporter.finished(),
                Err(e) => {
                    warn!(session = %reporter.session(), error = %e, "Fallback playback failed");
                    reporter.failed(e.into());
                },
            }
        });

        let abort = task.abort_handle();
        let output = Arc::clone(&self.output);
        FallbackHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst);
            abort.abort();
            output.stop();
        })
    }
}
