//! Speech orchestrator
//!
//! Owns the single [`PlaybackSession`] and drives it through
//! `Idle -> Preparing -> Speaking -> Idle`, or `-> Error` when playback
//! fails. Taking `&mut self` on every operation keeps calls linear: a new
//! summary always cancels the one in flight before it starts.

use std::fmt;
use std::sync::Arc;

use domain::{ForecastSummary, Language};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument, warn};

use crate::catalog::VoiceCatalog;
use crate::config::VoiceSummaryConfig;
use crate::error::{PlaybackErrorKind, SpeechError};
use crate::events::{PlaybackEvent, PlaybackOutcome, PlaybackReporter, SessionUpdate};
use crate::ports::{FallbackHandle, FallbackPlayer, SynthesisEngine};
use crate::selector;
use crate::session::{PlaybackMode, PlaybackSession, PlaybackState, SessionId};
use crate::summary::SummaryComposer;
use crate::types::Utterance;

/// Speaks forecast summaries through the local engine or the fallback player
pub struct SpeechOrchestrator {
    engine: Arc<dyn SynthesisEngine>,
    fallback: Arc<dyn FallbackPlayer>,
    catalog: VoiceCatalog,
    composer: SummaryComposer,
    speech_rate: f32,
    session: PlaybackSession,
    active_fallback: Option<FallbackHandle>,
    last_session: SessionId,
    events_tx: UnboundedSender<PlaybackEvent>,
    events_rx: UnboundedReceiver<PlaybackEvent>,
}

impl fmt::Debug for SpeechOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechOrchestrator")
            .field("catalog", &self.catalog)
            .field("composer", &self.composer)
            .field("speech_rate", &self.speech_rate)
            .field("session", &self.session)
            .field("active_fallback", &self.active_fallback)
            .finish_non_exhaustive()
    }
}

impl SpeechOrchestrator {
    /// Create an orchestrator with an idle session
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(
        engine: Arc<dyn SynthesisEngine>,
        fallback: Arc<dyn FallbackPlayer>,
        config: &VoiceSummaryConfig,
    ) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let catalog =
            VoiceCatalog::new(Arc::clone(&engine)).with_timeout(config.voice_catalog_timeout());

        Ok(Self {
            engine,
            fallback,
            catalog,
            composer: SummaryComposer::new(config.city.clone(), config.city_te.clone()),
            speech_rate: config.speech_rate,
            session: PlaybackSession::default(),
            active_fallback: None,
            last_session: SessionId::default(),
            events_tx,
            events_rx,
        })
    }

    /// The playback session
    #[must_use]
    pub const fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Current session state
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.session.state()
    }

    /// Whether audio is being produced
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.session.state() == PlaybackState::Speaking
    }

    /// Speak a summary of `forecast`
    ///
    /// Cancels any playback in flight, composes the text, waits for the
    /// host voice list and dispatches to the local engine when a voice fits,
    /// otherwise to the fallback player. Returns the id of the new session;
    /// its end arrives later as a [`SessionUpdate`].
    #[instrument(skip(self, forecast), fields(lang = %forecast.language, bill_type = %forecast.bill_category))]
    pub async fn summarize(&mut self, forecast: &ForecastSummary) -> SessionId {
        if self.session.state() != PlaybackState::Idle {
            self.interrupt();
            self.session.reset();
        }

        let text = self.composer.compose(forecast);
        let id = self.last_session.next();
        self.last_session = id;
        self.session.begin(id);

        let voices = self.catalog.populate().await;
        let language_tag = forecast.language.locale_tag();
        let reporter = PlaybackReporter::new(id, self.events_tx.clone());

        if let Some(voice) = selector::select(&voices, language_tag).cloned() {
            info!(session = %id, voice = %voice.display_name, "Speaking summary with local voice");
            let utterance =
                Utterance::new(text, language_tag, self.speech_rate).with_voice(voice);
            self.session
                .start_speaking(PlaybackMode::Local, utterance.clone());
            self.engine.speak(utterance, reporter);
        } else {
            info!(
                session = %id,
                voices = voices.len(),
                "No local voice for language, using rendered audio"
            );
            let handle = self
                .fallback
                .play(&text, forecast.language.code(), reporter);
            self.session.start_speaking(
                PlaybackMode::Fallback,
                Utterance::new(text, language_tag, self.speech_rate),
            );
            self.active_fallback = Some(handle);
        }

        id
    }

    /// Stop playback and return to idle
    ///
    /// Idempotent; does nothing when already idle.
    pub fn stop(&mut self) {
        if self.session.state() == PlaybackState::Idle {
            debug!("Stop requested while idle");
            return;
        }

        info!(session = %self.session.id(), "Stopping voice summary");
        self.interrupt();
        self.session.reset();
    }

    /// Apply one playback event to the session
    ///
    /// Events for a superseded session, or arriving when nothing is being
    /// spoken, are dropped and yield `None`.
    pub fn handle_event(&mut self, event: PlaybackEvent) -> Option<SessionUpdate> {
        let current = self.session.id();
        if event.session != current || self.session.state() != PlaybackState::Speaking {
            debug!(
                event_session = %event.session,
                session = %current,
                "Dropping stale playback event"
            );
            return None;
        }

        self.active_fallback = None;

        match event.outcome {
            PlaybackOutcome::Finished => {
                info!(session = %current, "Voice summary finished");
                self.session.reset();
                Some(SessionUpdate::Completed(current))
            },
            PlaybackOutcome::Failed(failure) if failure.kind == PlaybackErrorKind::Interrupted => {
                debug!(session = %current, "Voice summary interrupted");
                self.session.reset();
                Some(SessionUpdate::Interrupted(current))
            },
            PlaybackOutcome::Failed(failure) => {
                let language = self
                    .session
                    .active_utterance()
                    .and_then(|utterance| Language::from_tag(utterance.language_tag()))
                    .unwrap_or_default();
                let message = failure.kind.user_message(language).unwrap_or_default();

                warn!(session = %current, error = %failure, "Voice summary failed");
                self.session.fail(failure.clone());
                Some(SessionUpdate::Failed {
                    session: current,
                    failure,
                    message,
                })
            },
        }
    }

    /// Wait for the next event that changes the session
    ///
    /// Returns `None` when nothing is being spoken.
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        while self.is_speaking() {
            let event = self.events_rx.recv().await?;
            if let Some(update) = self.handle_event(event) {
                return Some(update);
            }
        }
        None
    }

    /// Apply every event already queued, without waiting
    pub fn drain_updates(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if let Some(update) = self.handle_event(event) {
                updates.push(update);
            }
        }
        updates
    }

    /// Tell the active leaf to stop
    fn interrupt(&mut self) {
        match self.session.mode() {
            PlaybackMode::Local => self.engine.cancel_all(),
            PlaybackMode::Fallback => {
                if let Some(handle) = self.active_fallback.take() {
                    handle.cancel();
                }
            },
            PlaybackMode::None => {},
        }
        self.active_fallback = None;
    }
}

impl Drop for SpeechOrchestrator {
    fn drop(&mut self) {
        if self.session.is_active() {
            debug!(session = %self.session.id(), "Orchestrator dropped, cancelling playback");
            self.interrupt();
        }
    }
}
