//! Playback session
//!
//! The single record tracking the current summary's audio. Only the
//! orchestrator moves it between states.

use std::fmt;

use tracing::debug;

use crate::error::PlaybackFailure;
use crate::types::Utterance;

/// Identifies one summary run
///
/// Ids increase monotonically; events carrying an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    /// Raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing playing
    #[default]
    Idle,
    /// Text composed, waiting for the voice list
    Preparing,
    /// Audio is being produced
    Speaking,
    /// Last playback failed; cleared by the next summarize or stop
    Error,
}

/// Which path produces the audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Host synthesis engine
    Local,
    /// Server-rendered audio
    Fallback,
    /// No playback running
    #[default]
    None,
}

/// The orchestrator's single playback session
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    id: SessionId,
    state: PlaybackState,
    mode: PlaybackMode,
    active_utterance: Option<Utterance>,
    last_failure: Option<PlaybackFailure>,
}

impl PlaybackSession {
    /// Id of the current (or last) run
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current playback path
    #[must_use]
    pub const fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Utterance being spoken; for fallback playback it carries the text and
    /// language but no voice
    #[must_use]
    pub const fn active_utterance(&self) -> Option<&Utterance> {
        self.active_utterance.as_ref()
    }

    /// Failure that moved the session to `Error`
    #[must_use]
    pub const fn last_failure(&self) -> Option<&PlaybackFailure> {
        self.last_failure.as_ref()
    }

    /// Whether a playback is being prepared or produced
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, PlaybackState::Preparing | PlaybackState::Speaking)
    }

    /// Start a new run
    pub(crate) fn begin(&mut self, id: SessionId) {
        debug!(session = %id, "Session preparing");
        self.id = id;
        self.state = PlaybackState::Preparing;
        self.mode = PlaybackMode::None;
        self.active_utterance = None;
        self.last_failure = None;
    }

    /// Playback dispatched
    pub(crate) fn start_speaking(&mut self, mode: PlaybackMode, utterance: Utterance) {
        debug!(session = %self.id, ?mode, "Session speaking");
        self.state = PlaybackState::Speaking;
        self.mode = mode;
        self.active_utterance = Some(utterance);
    }

    /// Playback failed with a user-visible error
    pub(crate) fn fail(&mut self, failure: PlaybackFailure) {
        debug!(session = %self.id, kind = %failure.kind, "Session failed");
        self.state = PlaybackState::Error;
        self.mode = PlaybackMode::None;
        self.active_utterance = None;
        self.last_failure = Some(failure);
    }

    /// Back to idle; the id is kept so late events can still be matched
    pub(crate) fn reset(&mut self) {
        debug!(session = %self.id, "Session idle");
        self.state = PlaybackState::Idle;
        self.mode = PlaybackMode::None;
        self.active_utterance = None;
        self.last_failure = None;
    }
}
