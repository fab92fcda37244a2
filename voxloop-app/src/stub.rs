//! Stub engine and speaker backends.
//!
//! Placeholders that exercise the full callback path end-to-end without a
//! real SDK. The stub engine "recognizes" a scripted utterance word by word;
//! the stub speaker reports playback start after a short synthesis delay.
//! Both deliver their notifications through the host's event channel so the
//! dispatch loop stays single-threaded.

use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::debug;
use voxloop_core::error::Result;
use voxloop_core::{DictationEngine, PhonemeSpeaker};

/// Events the host dispatch loop consumes.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Partial(String),
    Full(String),
    SpeechStarted(String),
}

/// Dictation stub that streams a scripted utterance.
pub struct StubDictation {
    tx: Sender<HostEvent>,
    utterance: String,
    word_delay: Duration,
}

impl StubDictation {
    pub fn new(tx: Sender<HostEvent>, utterance: impl Into<String>) -> Self {
        Self {
            tx,
            utterance: utterance.into(),
            word_delay: Duration::from_millis(120),
        }
    }
}

impl DictationEngine for StubDictation {
    fn activate(&mut self) -> Result<()> {
        debug!("StubDictation::activate — streaming scripted utterance");
        let tx = self.tx.clone();
        let utterance = self.utterance.clone();
        let word_delay = self.word_delay;

        thread::spawn(move || {
            let words: Vec<&str> = utterance.split_whitespace().collect();
            let mut partial = String::new();
            for word in &words {
                thread::sleep(word_delay);
                if !partial.is_empty() {
                    partial.push(' ');
                }
                partial.push_str(word);
                let _ = tx.send(HostEvent::Partial(partial.clone()));
            }
            thread::sleep(word_delay);
            let _ = tx.send(HostEvent::Full(utterance));
        });
        Ok(())
    }
}

/// Speaker stub that "starts playback" after a fixed synthesis delay.
pub struct StubSpeaker {
    tx: Sender<HostEvent>,
    synthesis_delay: Duration,
}

impl StubSpeaker {
    pub fn new(tx: Sender<HostEvent>) -> Self {
        Self {
            tx,
            synthesis_delay: Duration::from_millis(80),
        }
    }
}

impl PhonemeSpeaker for StubSpeaker {
    fn speak(&mut self, text: &str) -> Result<()> {
        debug!("StubSpeaker::speak — {text:?}");
        let tx = self.tx.clone();
        let text = text.to_string();
        let delay = self.synthesis_delay;

        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(HostEvent::SpeechStarted(text));
        });
        Ok(())
    }
}
