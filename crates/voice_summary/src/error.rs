//! Voice summary errors
//!
//! Playback failures never escape the orchestrator as `Err`; they are
//! classified into a [`PlaybackErrorKind`] and applied to the session.

use std::fmt;

use domain::Language;
use thiserror::Error;

/// Errors raised while setting the voice summary up
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Classification of a playback failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackErrorKind {
    /// The host refused to play audio (autoplay policy, missing permission)
    PermissionDenied,
    /// Audio could not be fetched
    Network,
    /// The engine or the decoder failed
    SynthesisFailed,
    /// Playback was cancelled by the orchestrator
    Interrupted,
}

impl PlaybackErrorKind {
    /// Map an error code reported by the host synthesis engine
    ///
    /// Unknown codes are treated as synthesis failures.
    #[must_use]
    pub fn from_engine_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "not-allowed" | "permission-denied" => Self::PermissionDenied,
            "network" => Self::Network,
            "interrupted" | "canceled" | "cancelled" => Self::Interrupted,
            _ => Self::SynthesisFailed,
        }
    }

    /// Stable identifier (`permission-denied`, `network`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::Network => "network",
            Self::SynthesisFailed => "synthesis-failed",
            Self::Interrupted => "interrupted",
        }
    }

    /// Whether the failure is reported to the user
    #[must_use]
    pub const fn is_user_visible(self) -> bool {
        !matches!(self, Self::Interrupted)
    }

    /// Message shown to the user, `None` for interruptions
    #[must_use]
    pub const fn user_message(self, language: Language) -> Option<&'static str> {
        let message = match (self, language) {
            (Self::Interrupted, _) => return None,
            (Self::PermissionDenied, Language::English) => {
                "Audio playback was blocked. Please allow sound for this page and try again."
            },
            (Self::PermissionDenied, Language::Telugu) => {
                "ఆడియో ప్లేబ్యాక్ నిరోధించబడింది. దయచేసి ధ్వనిని అనుమతించి మళ్లీ ప్రయత్నించండి."
            },
            (Self::Network, Language::English) => {
                "Could not load the voice summary. Please check your connection."
            },
            (Self::Network, Language::Telugu) => {
                "వాయిస్ సారాంశాన్ని లోడ్ చేయడం సాధ్యం కాలేదు. దయచేసి కనెక్షన్‌ని తనిఖీ చేయండి."
            },
            (Self::SynthesisFailed, Language::English) => {
                "The voice summary could not be played."
            },
            (Self::SynthesisFailed, Language::Telugu) => {
                "వాయిస్ సారాంశాన్ని ప్లే చేయడం సాధ్యం కాలేదు."
            },
        };
        Some(message)
    }
}

impl fmt::Display for PlaybackErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified playback failure with its detail text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct PlaybackFailure {
    /// Failure class
    pub kind: PlaybackErrorKind,
    /// Human readable detail for logs
    pub detail: String,
}

impl PlaybackFailure {
    /// Create a failure of the given kind
    pub fn new(kind: PlaybackErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Errors of the server-rendered fallback playback
#[derive(Debug, Error)]
pub enum FallbackPlaybackError {
    /// Failed to connect to the rendering service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Rendering service answered with a non-success status
    #[error("Rendering service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response could not be decoded as audio
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Audio output failed while playing
    #[error("Audio output failed: {0}")]
    Output(String),
}

impl FallbackPlaybackError {
    /// Classify for the session
    #[must_use]
    pub const fn kind(&self) -> PlaybackErrorKind {
        match self {
            Self::ConnectionFailed(_)
            | Self::Timeout(_)
            | Self::RequestFailed(_)
            | Self::Status { .. } => PlaybackErrorKind::Network,
            Self::InvalidAudio(_) | Self::Output(_) => PlaybackErrorKind::SynthesisFailed,
        }
    }
}

/// Timeouts are classified by the caller, which knows the configured limit
impl From<reqwest::Error> for FallbackPlaybackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() || err.is_body() {
            Self::InvalidAudio(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<FallbackPlaybackError> for PlaybackFailure {
    fn from(err: FallbackPlaybackError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}
