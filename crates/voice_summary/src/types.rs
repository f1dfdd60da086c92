//! Types for the voice summary
//!
//! Contains host voices, utterances handed to the synthesis engine and the
//! audio fetched for fallback playback.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A synthesis voice offered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Host identifier (voice URI)
    pub id: String,
    /// BCP-47 language tag as reported by the host (`te-IN`, `en_US`, ...)
    pub language_tag: String,
    /// Human-readable name (`Google తెలుగు`, `Microsoft Heera - English (India)`)
    pub display_name: String,
}

impl Voice {
    /// Create a new voice
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        language_tag: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            language_tag: language_tag.into(),
            display_name: display_name.into(),
        }
    }
}

/// One request to the local synthesis engine
///
/// Built fresh for every summary and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    text: String,
    language_tag: String,
    rate: f32,
    voice: Option<Voice>,
}

impl Utterance {
    /// Create an utterance without a pinned voice
    #[must_use]
    pub fn new(text: impl Into<String>, language_tag: impl Into<String>, rate: f32) -> Self {
        Self {
            text: text.into(),
            language_tag: language_tag.into(),
            rate,
            voice: None,
        }
    }

    /// Pin the voice the engine should use
    #[must_use]
    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Text to speak
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language tag the engine should speak in
    #[must_use]
    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    /// Speaking rate (1.0 is the engine's normal speed)
    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Pinned voice, if any
    #[must_use]
    pub const fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }
}

/// Audio formats the rendering service may answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// OGG container
    Ogg,
    /// WAV format (uncompressed)
    Wav,
    /// WebM format
    Webm,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
        }
    }

    /// Parse audio format from a `Content-Type` value
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // "audio/ogg; codecs=opus" -> "audio/ogg"
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime.to_ascii_lowercase().as_str() {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" | "audio/opus" => Some(Self::Ogg),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/webm" => Some(Self::Webm),
            _ => None,
        }
    }
}

/// Fetched audio ready for the output sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Bytes,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub fn new(data: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
