//! Callback table for dictation engine notifications.
//!
//! Engines differ in how they deliver results (listener registration,
//! channels, FFI callbacks). Rather than depending on any of those, the core
//! exposes three named slots the host fills at startup and fires as its
//! engine's notifications arrive. An unset slot is a no-op.

/// Named callback slots for the three dictation notifications.
#[derive(Default)]
pub struct DictationHooks {
    on_partial: Option<Box<dyn FnMut(&str) + Send>>,
    on_full: Option<Box<dyn FnMut(&str) + Send>>,
    on_error: Option<Box<dyn FnMut(&str, &str) + Send>>,
}

impl DictationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired for every streaming partial transcription.
    pub fn set_on_partial(&mut self, f: impl FnMut(&str) + Send + 'static) -> &mut Self {
        self.on_partial = Some(Box::new(f));
        self
    }

    /// Fired once per utterance with the committed final text.
    pub fn set_on_full(&mut self, f: impl FnMut(&str) + Send + 'static) -> &mut Self {
        self.on_full = Some(Box::new(f));
        self
    }

    /// Fired when the engine reports an error (code, message).
    pub fn set_on_error(&mut self, f: impl FnMut(&str, &str) + Send + 'static) -> &mut Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn emit_partial(&mut self, text: &str) {
        if let Some(f) = self.on_partial.as_mut() {
            f(text);
        }
    }

    pub fn emit_full(&mut self, text: &str) {
        if let Some(f) = self.on_full.as_mut() {
            f(text);
        }
    }

    pub fn emit_error(&mut self, code: &str, message: &str) {
        if let Some(f) = self.on_error.as_mut() {
            f(code, message);
        }
    }
}

impl std::fmt::Debug for DictationHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictationHooks")
            .field("on_partial", &self.on_partial.is_some())
            .field("on_full", &self.on_full.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
