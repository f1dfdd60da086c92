//! Voice Summary - bilingual spoken forecast summaries
//!
//! Turns a consumption forecast into speech for the utility dashboard:
//! - `numerals` - Integers as spoken English or Telugu words
//! - `catalog` - Host voice list, waiting for late population
//! - `selector` - Best host voice for a language tag
//! - `providers` - Server-rendered fallback audio
//! - `orchestrator` - Single playback session, cancellation and errors
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the host capabilities (synthesis engine,
//!   fallback player, audio output)
//! - `providers` module contains concrete adapters
//!
//! # Example
//!
//! ```ignore
//! use voice_summary::{RemoteAudioPlayer, SpeechOrchestrator, VoiceSummaryConfig};
//!
//! let config = VoiceSummaryConfig::load()?;
//! let fallback = Arc::new(RemoteAudioPlayer::new(&config, output)?);
//! let mut orchestrator = SpeechOrchestrator::new(engine, fallback, &config)?;
//!
//! orchestrator.summarize(&forecast).await;
//! while let Some(update) = orchestrator.next_update().await {
//!     // show update to the user
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod numerals;
pub mod orchestrator;
pub mod ports;
pub mod providers;
pub mod selector;
pub mod session;
pub mod summary;
pub mod types;

#[cfg(test)]
mod testing;

pub use catalog::{DEFAULT_POPULATE_TIMEOUT, VoiceCatalog};
pub use config::VoiceSummaryConfig;
pub use error::{FallbackPlaybackError, PlaybackErrorKind, PlaybackFailure, SpeechError};
pub use events::{PlaybackEvent, PlaybackOutcome, PlaybackReporter, SessionUpdate};
pub use numerals::{localize, localize_in};
pub use orchestrator::SpeechOrchestrator;
pub use ports::{AudioOutput, FallbackHandle, FallbackPlayer, SynthesisEngine};
pub use providers::RemoteAudioPlayer;
pub use selector::{MatchTier, select};
pub use session::{PlaybackMode, PlaybackSession, PlaybackState, SessionId};
pub use summary::SummaryComposer;
pub use types::{AudioData, AudioFormat, Utterance, Voice};
