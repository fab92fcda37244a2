//! Console status sink — the demo host's stand-in for a UI text label.

use voxloop_core::StatusSink;

#[derive(Debug, Default)]
pub struct ConsoleStatus {
    current: String,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(&self) {
        for line in self.current.lines() {
            println!("  | {line}");
        }
    }
}

impl StatusSink for ConsoleStatus {
    fn set_status(&mut self, text: &str) {
        self.current = text.to_string();
        self.render();
    }

    fn append_status(&mut self, text: &str) {
        self.current.push_str(text);
        self.render();
    }
}
