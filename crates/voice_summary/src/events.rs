//! Playback events
//!
//! Engines and players report the end of a playback through a
//! [`PlaybackReporter`] bound to the session that started it. The
//! orchestrator applies the events and turns them into [`SessionUpdate`]s.

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::error::{PlaybackErrorKind, PlaybackFailure};
use crate::session::SessionId;

/// How a playback ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Played to the end
    Finished,
    /// Stopped with a failure
    Failed(PlaybackFailure),
}

/// End of a playback, tagged with the session that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackEvent {
    /// Session the playback belongs to
    pub session: SessionId,
    /// How it ended
    pub outcome: PlaybackOutcome,
}

/// Handle given to engines and players for reporting a playback's end
#[derive(Debug, Clone)]
pub struct PlaybackReporter {
    session: SessionId,
    events: UnboundedSender<PlaybackEvent>,
}

impl PlaybackReporter {
    /// Create a reporter for `session` sending into `events`
    #[must_use]
    pub const fn new(session: SessionId, events: UnboundedSender<PlaybackEvent>) -> Self {
        Self { session, events }
    }

    /// Session this reporter belongs to
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Report that playback finished
    pub fn finished(&self) {
        self.send(PlaybackOutcome::Finished);
    }

    /// Report a classified failure
    pub fn failed(&self, failure: PlaybackFailure) {
        self.send(PlaybackOutcome::Failed(failure));
    }

    /// Report a failure using the host engine's error code
    pub fn failed_with_code(&self, code: &str, detail: impl Into<String>) {
        self.failed(PlaybackFailure::new(
            PlaybackErrorKind::from_engine_code(code),
            detail,
        ));
    }

    fn send(&self, outcome: PlaybackOutcome) {
        let event = PlaybackEvent {
            session: self.session,
            outcome,
        };
        if self.events.send(event).is_err() {
            debug!(session = %self.session, "Orchestrator gone, dropping playback event");
        }
    }
}

/// Session change produced by applying a playback event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Playback finished, session is idle
    Completed(SessionId),
    /// Playback was interrupted, session is idle and nothing is reported
    Interrupted(SessionId),
    /// Playback failed, session is in `Error`
    Failed {
        /// Session that failed
        session: SessionId,
        /// The classified failure
        failure: PlaybackFailure,
        /// Message for the user, in the summary's language
        message: &'static str,
    },
}
