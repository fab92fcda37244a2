//! # voxloop-core
//!
//! Engine-independent voice round-trip latency logger.
//!
//! ## Control flow
//!
//! ```text
//! DictationEngine ──(partial/full/error)──► DictationHooks ──► RoundTripLogger
//!                                                                 │
//!                                             LatencyTimers ◄─────┼────► TranscriptStore
//!                                                                 │        (1_STT.json)
//!                                                             EventLog
//!                                                          (LatencyLog.txt)
//!
//! host ──play back──► RoundTripLogger ──speak()──► PhonemeSpeaker
//!                            ▲                          │
//!                            └──── on_speech_started ◄──┘
//! ```
//!
//! All operations run synchronously on the host's event-dispatch thread;
//! file writes complete before the triggering callback returns.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod event_log;
pub mod hooks;
pub mod logger;
pub mod speaker;
pub mod status;
pub mod timer;
pub mod transcript;

// Convenience re-exports for downstream crates
pub use config::SessionConfig;
pub use engine::{DictationEngine, EngineHandle};
pub use error::VoxloopError;
pub use hooks::DictationHooks;
pub use logger::{LoggerHandle, RoundTripLogger};
pub use speaker::{PhonemeSpeaker, SpeakerHandle};
pub use status::{BufferedStatus, StatusHandle, StatusSink};
pub use timer::{LatencyTimers, TimerKind};
pub use transcript::{ResponseBody, ResponsePayload, TranscriptRecord, TranscriptStore};
