//! Voice catalog
//!
//! Hosts often report an empty voice list until their engine has loaded.
//! [`VoiceCatalog::populate`] waits for the "voices changed" notification,
//! but never longer than the configured timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ports::SynthesisEngine;
use crate::types::Voice;

/// Default time to wait for a late voice list
pub const DEFAULT_POPULATE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Enumerates host voices, handling late population
#[derive(Clone)]
pub struct VoiceCatalog {
    engine: Arc<dyn SynthesisEngine>,
    timeout: Duration,
}

impl VoiceCatalog {
    /// Create a catalog over `engine` with the default timeout
    pub fn new(engine: Arc<dyn SynthesisEngine>) -> Self {
        Self {
            engine,
            timeout: DEFAULT_POPULATE_TIMEOUT,
        }
    }

    /// Override the population timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Population timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current voice list, waiting for the host if it is still empty
    ///
    /// Resolves with whatever the host has when the notification fires, the
    /// notifier is dropped, or the timeout elapses. Never fails; the list may
    /// be empty.
    pub async fn populate(&self) -> Vec<Voice> {
        let voices = self.engine.enumerate_voices();
        if !voices.is_empty() {
            return voices;
        }

        let changed = self.engine.subscribe_voices_changed();

        // The list may have landed between the query and the subscription.
        let voices = self.engine.enumerate_voices();
        if !voices.is_empty() {
            return voices;
        }

        debug!(timeout_ms = self.timeout.as_millis(), "Waiting for host voices");

        tokio::select! {
            result = changed => {
                if result.is_err() {
                    debug!("Voice notifier dropped");
                }
            },
            () = tokio::time::sleep(self.timeout) => {
                warn!(timeout_ms = self.timeout.as_millis(), "Voice list still empty after timeout");
            },
        }

        self.engine.enumerate_voices()
    }
}

impl fmt::Debug for VoiceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCatalog")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
