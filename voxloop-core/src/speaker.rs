//! Speech synthesizer abstraction.
//!
//! Playback is fire-and-forget: `speak` submits text to the external
//! synthesizer and returns. The host routes the synthesizer's
//! playback-started notification back into
//! [`crate::logger::RoundTripLogger::on_speech_started`], which is where the
//! TTS and round-trip timers stop.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

/// Contract for text-to-speech backends.
pub trait PhonemeSpeaker: Send + 'static {
    /// Submit `text` for synthesis and playback.
    ///
    /// # Errors
    /// Returns an error if the synthesizer rejects the submission.
    fn speak(&mut self, text: &str) -> Result<()>;
}

/// Thread-safe reference-counted handle to any `PhonemeSpeaker` implementor.
#[derive(Clone)]
pub struct SpeakerHandle(pub Arc<Mutex<dyn PhonemeSpeaker>>);

impl SpeakerHandle {
    /// Wrap any `PhonemeSpeaker` in a `SpeakerHandle`.
    pub fn new<S: PhonemeSpeaker>(speaker: S) -> Self {
        Self(Arc::new(Mutex::new(speaker)))
    }

    pub fn speak(&self, text: &str) -> Result<()> {
        self.0.lock().speak(text)
    }
}

impl std::fmt::Debug for SpeakerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeakerHandle").finish_non_exhaustive()
    }
}
