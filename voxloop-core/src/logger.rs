//! `RoundTripLogger` — the event-handler core.
//!
//! ## Control flow
//!
//! ```text
//! start_dictation()     → status "Listening...", STT + RoundTrip restart,
//!                         engine.activate()
//! on_partial_text()     → status mirrors the streaming text
//! on_full_text()        → STT stops, transcript persisted, "STT=<n>ms" logged
//! play_back_transcript()→ read 1_TTS.json; TTS + RoundTrip restart,
//!                         speaker.speak(); or "No transcript yet!"
//! on_speech_started()   → TTS + RoundTrip stop,
//!                         "TTS=<n>ms, Manual RoundTrip=<n>ms" logged
//! ```
//!
//! Every operation runs synchronously on the host's dispatch thread and
//! completes before the triggering callback returns. Failures while
//! persisting or logging are reported (status text + tracing) and never
//! escalate — a broken disk should not kill a voice session.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::engine::EngineHandle;
use crate::error::Result;
use crate::event_log::EventLog;
use crate::hooks::DictationHooks;
use crate::speaker::SpeakerHandle;
use crate::status::StatusHandle;
use crate::timer::{LatencyTimers, TimerKind};
use crate::transcript::TranscriptStore;

pub struct RoundTripLogger {
    store: TranscriptStore,
    timers: LatencyTimers,
    event_log: EventLog,
    status: StatusHandle,
    engine: EngineHandle,
    speaker: SpeakerHandle,
}

impl RoundTripLogger {
    /// Build the logger for one session. Opens the latency log (appending
    /// the session-start marker) before any event can arrive.
    pub fn new(
        config: &SessionConfig,
        engine: EngineHandle,
        speaker: SpeakerHandle,
        status: StatusHandle,
    ) -> Result<Self> {
        let event_log = EventLog::open(config.log_path())?;
        Ok(Self {
            store: TranscriptStore::new(config),
            timers: LatencyTimers::new(),
            event_log,
            status,
            engine,
            speaker,
        })
    }

    /// Host action: begin a listening session.
    pub fn start_dictation(&mut self) {
        self.status.set("Listening...");
        self.timers.restart(TimerKind::Stt);
        self.timers.restart(TimerKind::RoundTrip);
        if let Err(e) = self.engine.activate() {
            warn!("dictation engine failed to activate: {e}");
            self.status.set(&format!("Error: {e}"));
        }
    }

    /// Engine notification: streaming partial transcription.
    pub fn on_partial_text(&mut self, text: &str) {
        self.status.set(text);
    }

    /// Engine notification: committed final transcription.
    ///
    /// Stops the STT timer, persists the transcript and appends the STT
    /// latency to the event log.
    pub fn on_full_text(&mut self, text: &str) {
        self.timers.stop(TimerKind::Stt);
        let stt_ms = self.timers.elapsed_millis(TimerKind::Stt);
        self.status
            .set(&format!("{text}\n(STT Latency: {stt_ms} ms)"));
        self.store.record_final(text);

        if let Err(e) = self.store.persist() {
            warn!("failed to persist transcript: {e}");
            self.status.append(&format!("\nError: {e}"));
        }
        if let Err(e) = self.event_log.append(&[("STT", stt_ms)]) {
            warn!("failed to append to latency log: {e}");
        }
        info!(latency_ms = stt_ms as u64, "final transcription");
    }

    /// Engine notification: recognition error. Passed through verbatim.
    pub fn on_dictation_error(&mut self, code: &str, message: &str) {
        warn!(code, message, "dictation engine reported an error");
        self.status.set(&format!("Error: {code}\n{message}"));
    }

    /// Host action: speak back the externally produced response.
    ///
    /// A missing or malformed response file both surface as
    /// "No transcript yet!" — playback is only attempted with real text.
    pub fn play_back_transcript(&mut self) {
        let text = match self.store.read_external_response() {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => {
                self.status.set("No transcript yet!");
                return;
            }
            Err(e) => {
                warn!("unreadable response file: {e}");
                self.status.set("No transcript yet!");
                return;
            }
        };

        self.timers.restart(TimerKind::Tts);
        self.timers.restart(TimerKind::RoundTrip);
        if let Err(e) = self.speaker.speak(&text) {
            warn!("speaker rejected playback: {e}");
            self.status.set(&format!("Error: {e}"));
        }
    }

    /// Speaker notification: synthesized playback has started.
    ///
    /// Stops the TTS and round-trip timers and logs both latencies.
    pub fn on_speech_started(&mut self, _spoken_text: &str) {
        self.timers.stop(TimerKind::Tts);
        self.timers.stop(TimerKind::RoundTrip);

        let tts_ms = self.timers.elapsed_millis(TimerKind::Tts);
        let round_trip_ms = self.timers.elapsed_millis(TimerKind::RoundTrip);
        let line = format!("TTS={tts_ms}ms, Manual RoundTrip={round_trip_ms}ms");

        self.status.append(&format!("\n{line}"));
        if let Err(e) = self
            .event_log
            .append(&[("TTS", tts_ms), ("Manual RoundTrip", round_trip_ms)])
        {
            warn!("failed to append to latency log: {e}");
        }
        info!(
            tts_ms = tts_ms as u64,
            round_trip_ms = round_trip_ms as u64,
            "playback started"
        );
    }

    /// Current elapsed milliseconds of one timer (running or stopped).
    pub fn elapsed_millis(&self, kind: TimerKind) -> u128 {
        self.timers.elapsed_millis(kind)
    }

    /// Last recorded final transcript, if any.
    pub fn last_transcript(&self) -> Option<String> {
        self.store.last_transcript().map(str::to_string)
    }
}

/// Cloneable handle for sharing the logger between the host's dispatch loop
/// and the callback table.
#[derive(Clone)]
pub struct LoggerHandle(Arc<Mutex<RoundTripLogger>>);

impl LoggerHandle {
    pub fn new(logger: RoundTripLogger) -> Self {
        Self(Arc::new(Mutex::new(logger)))
    }

    pub fn start_dictation(&self) {
        self.0.lock().start_dictation();
    }

    pub fn on_partial_text(&self, text: &str) {
        self.0.lock().on_partial_text(text);
    }

    pub fn on_full_text(&self, text: &str) {
        self.0.lock().on_full_text(text);
    }

    pub fn on_dictation_error(&self, code: &str, message: &str) {
        self.0.lock().on_dictation_error(code, message);
    }

    pub fn play_back_transcript(&self) {
        self.0.lock().play_back_transcript();
    }

    pub fn on_speech_started(&self, spoken_text: &str) {
        self.0.lock().on_speech_started(spoken_text);
    }

    pub fn elapsed_millis(&self, kind: TimerKind) -> u128 {
        self.0.lock().elapsed_millis(kind)
    }

    pub fn last_transcript(&self) -> Option<String> {
        self.0.lock().last_transcript()
    }

    /// Build a callback table with all three slots wired to this logger.
    /// The host hands this to whatever delivers its engine's notifications.
    pub fn hooks(&self) -> DictationHooks {
        let mut hooks = DictationHooks::new();
        let partial = self.clone();
        hooks.set_on_partial(move |text| partial.on_partial_text(text));
        let full = self.clone();
        hooks.set_on_full(move |text| full.on_full_text(text));
        let error = self.clone();
        hooks.set_on_error(move |code, message| error.on_dictation_error(code, message));
        hooks
    }
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle").finish_non_exhaustive()
    }
}
