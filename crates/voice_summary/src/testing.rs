//! In-memory host doubles for unit tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::error::FallbackPlaybackError;
use crate::events::PlaybackReporter;
use crate::ports::{FallbackHandle, FallbackPlayer, SynthesisEngine};
use crate::types::{Utterance, Voice};

/// Synthesis engine that records utterances and lets tests finish them
#[derive(Debug, Default)]
pub struct FakeEngine {
    voices: Mutex<Vec<Voice>>,
    notifiers: Mutex<Vec<oneshot::Sender<()>>>,
    drop_notifier: bool,
    subscriptions: AtomicUsize,
    spoken: Mutex<Vec<Utterance>>,
    pending: Mutex<Vec<PlaybackReporter>>,
    cancels: AtomicUsize,
}

impl FakeEngine {
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices: Mutex::new(voices),
            ..Default::default()
        }
    }

    /// Drop the notifier instead of keeping it
    pub fn without_notifier(mut self) -> Self {
        self.drop_notifier = true;
        self
    }

    /// Replace the voice list and fire pending notifications
    pub fn load_voices(&self, voices: Vec<Voice>) {
        *self.voices.lock().unwrap() = voices;
        for notifier in self.notifiers.lock().unwrap().drain(..) {
            let _ = notifier.send(());
        }
    }

    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Finish the utterance being spoken
    pub fn finish(&self) {
        if let Some(reporter) = self.pending.lock().unwrap().pop() {
            reporter.finished();
        }
    }

    /// Fail the utterance being spoken with a host error code
    pub fn fail(&self, code: &str) {
        if let Some(reporter) = self.pending.lock().unwrap().pop() {
            reporter.failed_with_code(code, format!("engine reported {code}"));
        }
    }
}

impl SynthesisEngine for FakeEngine {
    fn enumerate_voices(&self) -> Vec<Voice> {
        self.voices.lock().unwrap().clone()
    }

    fn subscribe_voices_changed(&self) -> oneshot::Receiver<()> {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        if !self.drop_notifier {
            self.notifiers.lock().unwrap().push(tx);
        }
        rx
    }

    fn speak(&self, utterance: Utterance, reporter: PlaybackReporter) {
        self.spoken.lock().unwrap().push(utterance);
        self.pending.lock().unwrap().push(reporter);
    }

    fn cancel_all(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        for reporter in self.pending.lock().unwrap().drain(..) {
            reporter.failed_with_code("interrupted", "cancelled by host");
        }
    }
}

#[derive(Debug)]
struct PendingPlayback {
    reporter: PlaybackReporter,
    cancelled: Arc<AtomicBool>,
}

/// Fallback player that records requests and lets tests end them
#[derive(Debug, Default)]
pub struct FakeFallbackPlayer {
    requests: Mutex<Vec<(String, String)>>,
    pending: Arc<Mutex<Vec<PendingPlayback>>>,
    cancels: Arc<AtomicUsize>,
}

impl FakeFallbackPlayer {
    /// `(text, language_tag)` of every play request
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }

    /// Finish the latest playback unless it was cancelled
    pub fn finish(&self) {
        if let Some(playback) = self.pending.lock().unwrap().pop() {
            if !playback.cancelled.load(Ordering::SeqCst) {
                playback.reporter.finished();
            }
        }
    }

    /// Fail the latest playback unless it was cancelled
    pub fn fail(&self, error: FallbackPlaybackError) {
        if let Some(playback) = self.pending.lock().unwrap().pop() {
            if !playback.cancelled.load(Ordering::SeqCst) {
                playback.reporter.failed(error.into());
            }
        }
    }
}

impl FallbackPlayer for FakeFallbackPlayer {
    fn play(&self, text: &str, language_tag: &str, reporter: PlaybackReporter) -> FallbackHandle {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), language_tag.to_string()));

        let cancelled = Arc::new(AtomicBool::new(false));
        self.pending.lock().unwrap().push(PendingPlayback {
            reporter,
            cancelled: Arc::clone(&cancelled),
        });

        let cancels = Arc::clone(&self.cancels);
        FallbackHandle::new(move || {
            cancelled.store(true, Ordering::SeqCst);
            cancels.fetch_add(1, Ordering::SeqCst);
        })
    }
}
