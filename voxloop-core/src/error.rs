use thiserror::Error;

/// All errors produced by voxloop-core.
#[derive(Debug, Error)]
pub enum VoxloopError {
    #[error("no transcript recorded yet")]
    MissingTranscript,

    #[error("dictation engine error [{code}]: {message}")]
    Dictation { code: String, message: String },

    #[error("speaker error: {0}")]
    Speaker(String),

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VoxloopError>;
