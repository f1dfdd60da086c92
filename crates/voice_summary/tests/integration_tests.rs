//! Integration tests for the voice_summary crate
//!
//! Drives the orchestrator end to end with a scripted host engine, the real
//! rendered-audio player against a mocked `/tts/speak`, and forecasts from
//! the forecast client against a mocked backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use domain::{BillCategory, ForecastSummary, Language};
use integration_forecast::{ForecastClient, ForecastConfig, HttpForecastClient, unavailable_forecast};
use tokio::sync::oneshot;
use voice_summary::{
    AudioData, AudioFormat, AudioOutput, FallbackPlaybackError, PlaybackErrorKind,
    PlaybackMode, PlaybackReporter, PlaybackState, RemoteAudioPlayer, SessionUpdate,
    SpeechOrchestrator, SynthesisEngine, Utterance, Voice, VoiceSummaryConfig,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Host engine that ends every utterance right away with a fixed outcome
struct ScriptedEngine {
    voices: Vec<Voice>,
    error_code: Option<&'static str>,
    spoken: Mutex<Vec<Utterance>>,
    notifiers: Mutex<Vec<oneshot::Sender<()>>>,
}

impl ScriptedEngine {
    fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            error_code: None,
            spoken: Mutex::new(Vec::new()),
            notifiers: Mutex::new(Vec::new()),
        }
    }

    fn failing(voices: Vec<Voice>, code: &'static str) -> Self {
        Self {
            error_code: Some(code),
            ..Self::new(voices)
        }
    }

    fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SynthesisEngine for ScriptedEngine {
    fn enumerate_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn subscribe_voices_changed(&self) -> oneshot::Receiver<()> {
        // Never fired, so only the timeout ends the wait.
        let (tx, rx) = oneshot::channel();
        self.notifiers.lock().unwrap().push(tx);
        rx
    }

    fn speak(&self, utterance: Utterance, reporter: PlaybackReporter) {
        self.spoken.lock().unwrap().push(utterance);
        match self.error_code {
            Some(code) => reporter.failed_with_code(code, "scripted failure"),
            None => reporter.finished(),
        }
    }

    fn cancel_all(&self) {}
}

/// Audio output that records what it was asked to play
#[derive(Default)]
struct RecordingOutput {
    played: Mutex<Vec<AudioData>>,
    stops: Mutex<usize>,
}

impl RecordingOutput {
    fn played(&self) -> Vec<AudioData> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioOutput for RecordingOutput {
    async fn play(&self, audio: AudioData) -> Result<(), FallbackPlaybackError> {
        self.played.lock().unwrap().push(audio);
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// Minimal MP3 frame header
fn mock_mp3_audio() -> Vec<u8> {
    vec![0xFF, 0xFB, 0x90, 0x00, 0x00, 0x00, 0x00, 0x00]
}

fn test_config(tts_base_url: &str) -> VoiceSummaryConfig {
    VoiceSummaryConfig {
        tts_base_url: tts_base_url.to_string(),
        request_timeout_ms: 5000,
        voice_catalog_timeout_ms: 50,
        ..Default::default()
    }
}

fn orchestrator(
    engine: Arc<ScriptedEngine>,
    output: Arc<RecordingOutput>,
    tts_base_url: &str,
) -> SpeechOrchestrator {
    let config = test_config(tts_base_url);
    let fallback = Arc::new(RemoteAudioPlayer::new(&config, output).expect("valid config"));
    SpeechOrchestrator::new(engine, fallback, &config).expect("valid config")
}

async fn mount_tts(server: &MockServer, lang: &str) {
    Mock::given(method("GET"))
        .and(path("/tts/speak"))
        .and(query_param("lang", lang))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(mock_mp3_audio()),
        )
        .expect(1)
        .mount(server)
        .await;
}

// ============ Local synthesis ============

#[tokio::test]
async fn english_summary_with_local_voice_completes() {
    let server = MockServer::start().await;
    let engine = Arc::new(ScriptedEngine::new(vec![Voice::new(
        "samantha",
        "en-US",
        "Samantha",
    )]));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine.clone(), output.clone(), &server.uri());

    let forecast = ForecastSummary::new(30.0, 60.0, 120.0, "Reduce usage", Language::English);
    let id = orchestrator.summarize(&forecast).await;

    assert_eq!(orchestrator.session().mode(), PlaybackMode::Local);
    assert_eq!(
        orchestrator.next_update().await,
        Some(SessionUpdate::Completed(id))
    );
    assert_eq!(orchestrator.state(), PlaybackState::Idle);

    let spoken = engine.spoken();
    assert_eq!(spoken.len(), 1);
    assert!(spoken[0].text().contains("30 degrees Celsius with 60 percent humidity"));
    assert!(output.played().is_empty());
}

#[tokio::test]
async fn engine_permission_error_is_surfaced() {
    let server = MockServer::start().await;
    let engine = Arc::new(ScriptedEngine::failing(
        vec![Voice::new("te", "te-IN", "Telugu")],
        "not-allowed",
    ));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine, output, &server.uri());

    let forecast = ForecastSummary::new(30.0, 60.0, 120.0, "", Language::Telugu);
    orchestrator.summarize(&forecast).await;

    match orchestrator.next_update().await {
        Some(SessionUpdate::Failed {
            failure, message, ..
        }) => {
            assert_eq!(failure.kind, PlaybackErrorKind::PermissionDenied);
            assert!(!message.is_ascii());
        },
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(orchestrator.state(), PlaybackState::Error);

    orchestrator.stop();
    assert_eq!(orchestrator.state(), PlaybackState::Idle);
}

// ============ Rendered-audio fallback ============

#[tokio::test]
async fn telugu_summary_without_voice_plays_rendered_audio() {
    let server = MockServer::start().await;
    mount_tts(&server, "te").await;

    let engine = Arc::new(ScriptedEngine::new(Vec::new()));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine.clone(), output.clone(), &server.uri());

    let forecast = ForecastSummary::new(30.0, 60.0, 120.0, "ఫ్యాన్లు వాడండి", Language::Telugu);
    let id = orchestrator.summarize(&forecast).await;

    assert_eq!(orchestrator.session().mode(), PlaybackMode::Fallback);
    assert_eq!(
        orchestrator.next_update().await,
        Some(SessionUpdate::Completed(id))
    );

    assert!(engine.spoken().is_empty());
    let played = output.played();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].format(), AudioFormat::Mp3);

    let requests = server.received_requests().await.expect("recording enabled");
    let text = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .expect("text parameter");
    assert!(text.contains("ముప్పై డిగ్రీల సెల్సియస్"));
    assert!(!text.chars().any(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn rendering_service_failure_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tts/speak"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = Arc::new(ScriptedEngine::new(Vec::new()));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine, output.clone(), &server.uri());

    let forecast = ForecastSummary::new(30.0, 60.0, 120.0, "", Language::English);
    orchestrator.summarize(&forecast).await;

    match orchestrator.next_update().await {
        Some(SessionUpdate::Failed {
            failure, message, ..
        }) => {
            assert_eq!(failure.kind, PlaybackErrorKind::Network);
            assert!(message.contains("connection"));
        },
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(output.played().is_empty());
}

#[tokio::test]
async fn stop_during_rendered_audio_fetch_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tts/speak"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(mock_mp3_audio())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let engine = Arc::new(ScriptedEngine::new(Vec::new()));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine, output.clone(), &server.uri());

    let forecast = ForecastSummary::new(30.0, 60.0, 120.0, "", Language::English);
    orchestrator.summarize(&forecast).await;
    orchestrator.stop();

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(orchestrator.state(), PlaybackState::Idle);
    assert!(orchestrator.drain_updates().is_empty());
    assert!(output.played().is_empty());
    assert_eq!(*output.stops.lock().unwrap(), 1);
}

// ============ Forecast to speech ============

#[tokio::test]
async fn fetched_water_forecast_is_spoken() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/analysis/forecast"))
        .and(query_param("bill_type", "water"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "forecast": 18,
            "forecast_cost": 240.0,
            "recommendation": "Fix leaking taps.",
            "current_weather": { "temp": 27.6, "humidity": 71, "desc": "Clouds" }
        })))
        .mount(&backend)
        .await;

    let client = HttpForecastClient::new(ForecastConfig {
        base_url: format!("{}/api/v1", backend.uri()),
        timeout_secs: 5,
        auth_token: Some("token".to_string()),
    })
    .expect("client");
    let report = client
        .get_forecast(Language::English, BillCategory::Water)
        .await
        .expect("forecast");

    let engine = Arc::new(ScriptedEngine::new(vec![Voice::new("d", "en-GB", "Daniel")]));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine.clone(), output, &backend.uri());

    orchestrator.summarize(&report.summary).await;
    orchestrator.next_update().await;

    let text = engine.spoken()[0].text().to_string();
    assert!(text.contains("28 degrees Celsius with 71 percent humidity"));
    assert!(text.contains("water consumption for next month is 18 kiloliters"));
    assert!(text.ends_with("Recommendation: Fix leaking taps."));
}

#[tokio::test]
async fn unavailable_forecast_is_spoken_in_telugu() {
    let server = MockServer::start().await;
    mount_tts(&server, "te").await;

    let engine = Arc::new(ScriptedEngine::new(Vec::new()));
    let output = Arc::new(RecordingOutput::default());
    let mut orchestrator = orchestrator(engine, output.clone(), &server.uri());

    let forecast = unavailable_forecast(Language::Telugu, BillCategory::Electricity);
    orchestrator.summarize(&forecast).await;

    assert!(matches!(
        orchestrator.next_update().await,
        Some(SessionUpdate::Completed(_))
    ));

    let requests = server.received_requests().await.expect("recording enabled");
    let text = requests[0]
        .url
        .query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .expect("text parameter");
    assert!(text.contains("సున్నా డిగ్రీల సెల్సియస్"));
    assert!(text.contains("కనెక్షన్"));
    assert_eq!(output.played().len(), 1);
}
