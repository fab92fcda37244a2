//! Voxloop demo host.
//!
//! Wires the stub dictation engine and stub speaker into a
//! `RoundTripLogger` and drives one scripted round trip through a
//! single-threaded event-dispatch loop: listen → final transcript persisted
//! → external response "arrives" → playback → latency logged.
//!
//! Pass a data directory as the first argument to override the default
//! session location.

mod console;
mod stub;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::unbounded;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxloop_core::{
    config, EngineHandle, LoggerHandle, ResponseBody, ResponsePayload, RoundTripLogger,
    SessionConfig, SpeakerHandle, StatusHandle,
};

use console::ConsoleStatus;
use stub::{HostEvent, StubDictation, StubSpeaker};

const DEMO_UTTERANCE: &str = "hello world";
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut session = config::load_config(&config::default_config_path());
    if let Some(dir) = std::env::args().nth(1) {
        session.data_dir = PathBuf::from(dir);
        session.normalize();
    }
    info!("session data directory: {}", session.data_dir.display());

    let (tx, rx) = unbounded::<HostEvent>();
    let logger = LoggerHandle::new(RoundTripLogger::new(
        &session,
        EngineHandle::new(StubDictation::new(tx.clone(), DEMO_UTTERANCE)),
        SpeakerHandle::new(StubSpeaker::new(tx)),
        StatusHandle::new(ConsoleStatus::new()),
    )?);
    let mut hooks = logger.hooks();

    println!("-- start dictation --");
    logger.start_dictation();

    // Single dispatch thread: every callback runs to completion (including
    // its file writes) before the next event is taken.
    loop {
        let event = rx
            .recv_timeout(EVENT_TIMEOUT)
            .context("timed out waiting for a host event")?;
        match event {
            HostEvent::Partial(text) => hooks.emit_partial(&text),
            HostEvent::Full(text) => {
                hooks.emit_full(&text);
                simulate_external_responder(&session, &text)?;
                println!("-- play back transcript --");
                logger.play_back_transcript();
            }
            HostEvent::SpeechStarted(text) => {
                logger.on_speech_started(&text);
                break;
            }
        }
    }

    println!("transcript: {}", session.stt_path().display());
    println!("latency log: {}", session.log_path().display());
    Ok(())
}

/// Stand-in for the external process that answers a transcript: writes the
/// response payload next to the persisted transcript.
fn simulate_external_responder(session: &SessionConfig, transcript: &str) -> Result<()> {
    let payload = ResponsePayload {
        lesson_id: session.lesson_id.clone(),
        teacher_id: session.teacher_id.clone(),
        response: ResponseBody {
            text: format!("You said: {transcript}"),
            confidence: 0.92,
        },
    };
    let path = session.tts_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(&payload)?)
        .with_context(|| format!("writing response payload to {}", path.display()))?;
    Ok(())
}
