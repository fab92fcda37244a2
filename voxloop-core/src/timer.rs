//! Latency timers.
//!
//! Each timer is an explicit state machine over a monotonic clock:
//!
//! ```text
//! Idle ──restart()──► Running ──stop()──► Stopped ──restart()──► Running
//! ```
//!
//! `restart()` always discards the previous elapsed value. `stop()` on an
//! idle timer is a no-op and subsequent reads return zero. Every timer sits
//! behind its own `parking_lot::Mutex` so last-writer-wins holds even if a
//! host dispatches callbacks from more than one thread.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// The three counters the round-trip logger maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Start of listening → final transcription.
    Stt,
    /// Playback request → synthesized speech starts.
    Tts,
    /// Full loop: listening → reply audible.
    RoundTrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running,
    Stopped,
}

/// A single named elapsed-duration counter.
#[derive(Debug)]
struct LatencyTimer {
    state: TimerState,
    started_at: Option<Instant>,
    elapsed: Duration,
}

impl LatencyTimer {
    const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            started_at: None,
            elapsed: Duration::ZERO,
        }
    }

    fn restart(&mut self) {
        self.state = TimerState::Running;
        self.started_at = Some(Instant::now());
        self.elapsed = Duration::ZERO;
    }

    fn stop(&mut self) {
        if self.state == TimerState::Running {
            if let Some(started_at) = self.started_at {
                self.elapsed = started_at.elapsed();
            }
            self.state = TimerState::Stopped;
        }
    }

    fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Idle => Duration::ZERO,
            TimerState::Running => self.started_at.map(|s| s.elapsed()).unwrap_or_default(),
            TimerState::Stopped => self.elapsed,
        }
    }
}

/// The full set of round-trip counters, one exclusive lock per timer.
#[derive(Debug)]
pub struct LatencyTimers {
    stt: Mutex<LatencyTimer>,
    tts: Mutex<LatencyTimer>,
    round_trip: Mutex<LatencyTimer>,
}

impl LatencyTimers {
    pub fn new() -> Self {
        Self {
            stt: Mutex::new(LatencyTimer::new()),
            tts: Mutex::new(LatencyTimer::new()),
            round_trip: Mutex::new(LatencyTimer::new()),
        }
    }

    fn timer(&self, kind: TimerKind) -> &Mutex<LatencyTimer> {
        match kind {
            TimerKind::Stt => &self.stt,
            TimerKind::Tts => &self.tts,
            TimerKind::RoundTrip => &self.round_trip,
        }
    }

    /// Reset and start the counter, discarding any prior elapsed value.
    pub fn restart(&self, kind: TimerKind) {
        self.timer(kind).lock().restart();
    }

    /// Stop the counter; the elapsed value is retained until the next
    /// `restart`. A stop on an idle timer is a no-op.
    pub fn stop(&self, kind: TimerKind) {
        self.timer(kind).lock().stop();
    }

    /// Current elapsed milliseconds — valid whether running or stopped;
    /// zero while idle.
    pub fn elapsed_millis(&self, kind: TimerKind) -> u128 {
        self.timer(kind).lock().elapsed().as_millis()
    }
}

impl Default for LatencyTimers {
    fn default() -> Self {
        Self::new()
    }
}
