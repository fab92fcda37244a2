//! Dictation engine abstraction.
//!
//! The `DictationEngine` trait decouples the logger from any specific
//! recognizer backend. Any engine able to deliver partial text, full text,
//! and error notifications (wired through [`crate::hooks::DictationHooks`])
//! is sufficient.
//!
//! `&mut self` on `activate` intentionally expresses that engines are
//! stateful — session handles, capture streams, retry counters. All mutation
//! is serialised through `EngineHandle`'s `parking_lot::Mutex`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;

/// Contract for speech recognition backends.
pub trait DictationEngine: Send + 'static {
    /// Begin listening. Transcription results arrive later through the
    /// host-wired callback table.
    ///
    /// # Errors
    /// Returns an error if the engine cannot start a listening session.
    fn activate(&mut self) -> Result<()>;
}

/// Thread-safe reference-counted handle to any `DictationEngine` implementor.
#[derive(Clone)]
pub struct EngineHandle(pub Arc<Mutex<dyn DictationEngine>>);

impl EngineHandle {
    /// Wrap any `DictationEngine` in an `EngineHandle`.
    pub fn new<E: DictationEngine>(engine: E) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    pub fn activate(&self) -> Result<()> {
        self.0.lock().activate()
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle").finish_non_exhaustive()
    }
}
