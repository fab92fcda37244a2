//! Transcript persistence.
//!
//! Two fixed wire formats, shared with external tooling and reproduced
//! field-for-field:
//!
//! - `<data_dir>/JSON/1_STT.json` — written here after each final
//!   transcription. Pretty-printed; field order is part of the contract.
//! - `<data_dir>/JSON/1_TTS.json` — written by an external responder
//!   process; read-only from this crate's perspective.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SessionConfig;
use crate::error::{Result, VoxloopError};

/// The persisted speech-to-text record. Declaration order matches the file
/// format expected by downstream consumers — do not reorder fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub modality: Vec<String>,
    pub text: String,
    pub photo_id: Vec<i64>,
    pub block_ids: Vec<i64>,
    pub lesson_id: String,
    pub teacher_id: String,
}

/// The externally produced response file (`1_TTS.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub lesson_id: String,
    pub teacher_id: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseBody {
    pub text: String,
    pub confidence: f32,
}

/// Holds the most recent final transcript and serializes it to disk.
///
/// No history: each `persist()` overwrites the previous file. At most one
/// record exists per session path.
#[derive(Debug)]
pub struct TranscriptStore {
    stt_path: PathBuf,
    tts_path: PathBuf,
    lesson_id: String,
    teacher_id: String,
    last_transcript: Option<String>,
}

impl TranscriptStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            stt_path: config.stt_path(),
            tts_path: config.tts_path(),
            lesson_id: config.lesson_id.clone(),
            teacher_id: config.teacher_id.clone(),
            last_transcript: None,
        }
    }

    /// Store `text` as the current transcript. Always succeeds.
    pub fn record_final(&mut self, text: impl Into<String>) {
        self.last_transcript = Some(text.into());
    }

    /// Last recorded final transcript, if any.
    pub fn last_transcript(&self) -> Option<&str> {
        self.last_transcript.as_deref()
    }

    /// Serialize the current transcript to the STT path, creating the JSON
    /// directory if absent and overwriting any previous file.
    ///
    /// # Errors
    /// - `VoxloopError::MissingTranscript` if `record_final` was never called.
    /// - `VoxloopError::Io` if the directory or file cannot be written.
    pub fn persist(&self) -> Result<PathBuf> {
        let text = self
            .last_transcript
            .clone()
            .ok_or(VoxloopError::MissingTranscript)?;

        let record = TranscriptRecord {
            modality: vec!["Speech".into()],
            text,
            photo_id: Vec::new(),
            block_ids: Vec::new(),
            lesson_id: self.lesson_id.clone(),
            teacher_id: self.teacher_id.clone(),
        };

        if let Some(parent) = self.stt_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.stt_path, json)?;
        info!("transcript saved as JSON: {}", self.stt_path.display());
        Ok(self.stt_path.clone())
    }

    /// Read the externally produced response file, if present.
    ///
    /// Returns `Ok(None)` when the file does not exist. Malformed JSON is a
    /// `VoxloopError::Parse`; the caller treats it as "no transcript".
    pub fn read_external_response(&self) -> Result<Option<String>> {
        if !self.tts_path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.tts_path)?;
        let payload: ResponsePayload = serde_json::from_str(&raw)?;
        Ok(Some(payload.response.text))
    }
}
