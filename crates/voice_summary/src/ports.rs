//! Port definitions for the voice summary
//!
//! Defines the host capabilities the orchestrator drives: the local
//! synthesis engine, the fallback player and the audio output sink.

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::oneshot;

use crate::error::FallbackPlaybackError;
use crate::events::PlaybackReporter;
use crate::types::{AudioData, Utterance, Voice};

/// Port for the host's local speech synthesis engine
///
/// Calls are fire-and-forget; the end of an utterance is reported through
/// the [`PlaybackReporter`] passed to [`SynthesisEngine::speak`].
pub trait SynthesisEngine: Send + Sync {
    /// Voices currently known to the host, possibly empty while the host is
    /// still loading them
    fn enumerate_voices(&self) -> Vec<Voice>;

    /// One-shot notification fired when the voice list changes
    ///
    /// Dropping the sender without firing means no change will come.
    fn subscribe_voices_changed(&self) -> oneshot::Receiver<()>;

    /// Start speaking `utterance`, reporting its end through `reporter`
    fn speak(&self, utterance: Utterance, reporter: PlaybackReporter);

    /// Cancel everything queued or speaking
    ///
    /// Pending utterances report `interrupted` (or `canceled`).
    fn cancel_all(&self);
}

/// Port for server-rendered fallback playback
pub trait FallbackPlayer: Send + Sync {
    /// Fetch audio for `(text, language_tag)` and play it
    ///
    /// The end of playback, or the failure, is reported through `reporter`.
    /// After the returned handle is cancelled nothing more is reported.
    fn play(&self, text: &str, language_tag: &str, reporter: PlaybackReporter) -> FallbackHandle;
}

/// Cancels a running fallback playback
pub struct FallbackHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl FallbackHandle {
    /// Create a handle that runs `cancel` when cancelled
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop playback immediately and suppress later reports
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for FallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Port for the host's audio output
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Play `audio`, resolving when playback ends
    ///
    /// # Errors
    ///
    /// Returns `FallbackPlaybackError::Output` if the sink cannot play it,
    /// or `FallbackPlaybackError::InvalidAudio` if it cannot be decoded.
    async fn play(&self, audio: AudioData) -> Result<(), FallbackPlaybackError>;

    /// Stop whatever is playing
    fn stop(&self);
}
