use std::fs;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use parking_lot::Mutex;
use voxloop_core::{
    BufferedStatus, DictationEngine, EngineHandle, LoggerHandle, PhonemeSpeaker, ResponseBody,
    ResponsePayload, RoundTripLogger, SessionConfig, SpeakerHandle, StatusHandle, TimerKind,
    TranscriptRecord,
};

/// Engine that only records whether it was activated; the test script plays
/// the role of the recognizer by firing hooks directly.
struct RecordingEngine {
    activated: Arc<AtomicBool>,
}

impl DictationEngine for RecordingEngine {
    fn activate(&mut self) -> voxloop_core::error::Result<()> {
        self.activated.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Speaker that captures every submitted text.
struct CapturingSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl PhonemeSpeaker for CapturingSpeaker {
    fn speak(&mut self, text: &str) -> voxloop_core::error::Result<()> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    logger: LoggerHandle,
    status: BufferedStatus,
    activated: Arc<AtomicBool>,
    spoken: Arc<Mutex<Vec<String>>>,
    config: SessionConfig,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = SessionConfig {
        data_dir: dir.path().to_path_buf(),
        ..SessionConfig::default()
    };

    let activated = Arc::new(AtomicBool::new(false));
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let status = BufferedStatus::new();

    let logger = RoundTripLogger::new(
        &config,
        EngineHandle::new(RecordingEngine {
            activated: Arc::clone(&activated),
        }),
        SpeakerHandle::new(CapturingSpeaker {
            spoken: Arc::clone(&spoken),
        }),
        StatusHandle::new(status.clone()),
    )
    .expect("build logger");

    Harness {
        logger: LoggerHandle::new(logger),
        status,
        activated,
        spoken,
        config,
        _dir: dir,
    }
}

fn write_response_file(config: &SessionConfig, text: &str) {
    let payload = ResponsePayload {
        lesson_id: config.lesson_id.clone(),
        teacher_id: config.teacher_id.clone(),
        response: ResponseBody {
            text: text.into(),
            confidence: 0.92,
        },
    };
    fs::create_dir_all(config.tts_path().parent().expect("parent")).expect("mkdir");
    fs::write(
        config.tts_path(),
        serde_json::to_string_pretty(&payload).expect("serialize"),
    )
    .expect("write response");
}

#[test]
fn start_dictation_activates_engine_and_shows_listening() {
    let h = harness();
    h.logger.start_dictation();

    assert!(h.activated.load(Ordering::SeqCst));
    assert_eq!(h.status.current(), "Listening...");
}

#[test]
fn partial_text_mirrors_to_status() {
    let h = harness();
    h.logger.start_dictation();
    h.logger.on_partial_text("hello wor");
    assert_eq!(h.status.current(), "hello wor");
}

#[test]
fn final_transcription_persists_and_logs_stt_latency() {
    let h = harness();
    h.logger.start_dictation();
    h.logger.on_full_text("hello world");

    let raw = fs::read_to_string(h.config.stt_path()).expect("read STT file");
    assert!(raw.contains("\"text\": \"hello world\""));
    let record: TranscriptRecord = serde_json::from_str(&raw).expect("parse STT file");
    assert_eq!(record.text, "hello world");

    let log = fs::read_to_string(h.config.log_path()).expect("read latency log");
    assert!(log.contains("=== Session Started "));
    assert!(log.contains("STT="), "missing STT line: {log}");

    assert!(h.status.current().contains("hello world"));
    assert!(h.status.current().contains("(STT Latency: "));
}

#[test]
fn engine_errors_pass_through_verbatim() {
    let h = harness();
    h.logger.start_dictation();
    h.logger.on_dictation_error("NETWORK", "socket closed");
    assert_eq!(h.status.current(), "Error: NETWORK\nsocket closed");
}

#[test]
fn playback_without_response_file_reports_no_transcript() {
    let h = harness();
    h.logger.play_back_transcript();

    assert_eq!(h.status.current(), "No transcript yet!");
    assert!(h.spoken.lock().is_empty());
}

#[test]
fn playback_with_malformed_response_file_reports_no_transcript() {
    let h = harness();
    fs::create_dir_all(h.config.tts_path().parent().expect("parent")).expect("mkdir");
    fs::write(h.config.tts_path(), "{ not json").expect("write junk");

    h.logger.play_back_transcript();

    assert_eq!(h.status.current(), "No transcript yet!");
    assert!(h.spoken.lock().is_empty());
}

#[test]
fn playback_speaks_the_response_text_and_speech_start_stops_timers() {
    let h = harness();
    write_response_file(&h.config, "good answer");

    h.logger.play_back_transcript();
    assert_eq!(h.spoken.lock().as_slice(), &["good answer".to_string()]);

    h.logger.on_speech_started("good answer");

    let tts_ms = h.logger.elapsed_millis(TimerKind::Tts);
    let frozen = h.logger.elapsed_millis(TimerKind::Tts);
    assert_eq!(tts_ms, frozen, "stopped timer must hold its value");

    let log = fs::read_to_string(h.config.log_path()).expect("read latency log");
    let line = log.lines().last().expect("latency line");
    assert!(line.contains("TTS="), "missing TTS: {line}");
    assert!(line.contains(", Manual RoundTrip="), "missing round trip: {line}");

    assert!(h.status.current().contains("TTS="));
    assert!(h.status.current().contains("Manual RoundTrip="));
}

#[test]
fn full_round_trip_scenario() {
    let h = harness();

    // Speak: "hello world" arrives as partials, then the final.
    h.logger.start_dictation();
    h.logger.on_partial_text("hello");
    h.logger.on_full_text("hello world");
    assert_eq!(h.logger.last_transcript().as_deref(), Some("hello world"));

    // An external responder produces the reply file.
    write_response_file(&h.config, "hello to you");

    // Play back: speaker receives the reply, then reports playback start.
    h.logger.play_back_transcript();
    h.logger.on_speech_started("hello to you");

    let log = fs::read_to_string(h.config.log_path()).expect("read latency log");
    let lines: Vec<&str> = log.lines().filter(|l| !l.is_empty()).collect();
    assert!(lines[0].starts_with("=== Session Started "));
    assert!(lines[1].contains("STT="));
    assert!(lines[2].contains("TTS=") && lines[2].contains("Manual RoundTrip="));
}

#[test]
fn hooks_route_engine_notifications_into_the_logger() {
    let h = harness();
    let mut hooks = h.logger.hooks();

    h.logger.start_dictation();
    hooks.emit_partial("hel");
    assert_eq!(h.status.current(), "hel");

    hooks.emit_full("hello world");
    assert!(h.config.stt_path().exists());

    hooks.emit_error("ABORTED", "user cancelled");
    assert_eq!(h.status.current(), "Error: ABORTED\nuser cancelled");
}
