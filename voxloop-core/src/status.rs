//! Inline status text surface.
//!
//! All user-visible feedback — listening prompts, transcripts with latency
//! annotations, error passthrough — flows through a single `StatusSink`.
//! Hosts implement it over whatever text surface they have (a console line,
//! a UI label).

use std::sync::Arc;

use parking_lot::Mutex;

/// Where inline status text goes.
pub trait StatusSink: Send + 'static {
    /// Replace the current status text.
    fn set_status(&mut self, text: &str);

    /// Append to the current status text (no separator is inserted).
    fn append_status(&mut self, text: &str);
}

/// Thread-safe reference-counted handle to any `StatusSink` implementor.
#[derive(Clone)]
pub struct StatusHandle(pub Arc<Mutex<dyn StatusSink>>);

impl StatusHandle {
    pub fn new<S: StatusSink>(sink: S) -> Self {
        Self(Arc::new(Mutex::new(sink)))
    }

    pub fn set(&self, text: &str) {
        self.0.lock().set_status(text);
    }

    pub fn append(&self, text: &str) {
        self.0.lock().append_status(text);
    }
}

impl std::fmt::Debug for StatusHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusHandle").finish_non_exhaustive()
    }
}

/// In-memory sink keeping only the current text. Clones share the same
/// buffer, so a host (or test) can keep one clone for reading and hand the
/// other to the logger.
#[derive(Debug, Clone, Default)]
pub struct BufferedStatus {
    current: Arc<Mutex<String>>,
}

impl BufferedStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> String {
        self.current.lock().clone()
    }
}

impl StatusSink for BufferedStatus {
    fn set_status(&mut self, text: &str) {
        *self.current.lock() = text.to_string();
    }

    fn append_status(&mut self, text: &str) {
        self.current.lock().push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_status_replaces_and_appends() {
        let view = BufferedStatus::new();
        let status = StatusHandle::new(view.clone());

        status.set("Listening...");
        assert_eq!(view.current(), "Listening...");

        status.set("hello");
        status.append("\nTTS=5ms");
        assert_eq!(view.current(), "hello\nTTS=5ms");
    }
}
