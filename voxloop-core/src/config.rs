//! Session configuration (JSON file in the app data directory).
//!
//! All file locations the logger touches are injected through
//! [`SessionConfig`] rather than hard-coded, so several sessions can run
//! side by side against different data directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct SessionConfig {
    /// Root directory for everything this session writes.
    pub data_dir: PathBuf,
    /// Subdirectory (under `data_dir`) holding the transcript JSON files.
    pub json_dir: String,
    /// File name of the persisted speech-to-text transcript.
    pub stt_file: String,
    /// File name of the externally produced response payload.
    pub tts_file: String,
    /// File name of the append-only latency log.
    pub log_file: String,
    /// Lesson identifier stamped into every persisted transcript.
    pub lesson_id: String,
    /// Teacher identifier stamped into every persisted transcript.
    pub teacher_id: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            json_dir: "JSON".into(),
            stt_file: "1_STT.json".into(),
            tts_file: "1_TTS.json".into(),
            log_file: "LatencyLog.txt".into(),
            lesson_id: "lesson-123".into(),
            teacher_id: "teacher-456".into(),
        }
    }
}

impl SessionConfig {
    /// Clamp empty or whitespace-only fields back to their defaults.
    pub fn normalize(&mut self) {
        let defaults = Self::default();
        normalize_name(&mut self.json_dir, &defaults.json_dir);
        normalize_name(&mut self.stt_file, &defaults.stt_file);
        normalize_name(&mut self.tts_file, &defaults.tts_file);
        normalize_name(&mut self.log_file, &defaults.log_file);
        normalize_name(&mut self.lesson_id, &defaults.lesson_id);
        normalize_name(&mut self.teacher_id, &defaults.teacher_id);
        if self.data_dir.as_os_str().is_empty() {
            self.data_dir = defaults.data_dir;
        }
    }

    /// `<data_dir>/<json_dir>/<stt_file>` — where `persist()` writes.
    pub fn stt_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_dir).join(&self.stt_file)
    }

    /// `<data_dir>/<json_dir>/<tts_file>` — the externally produced response.
    pub fn tts_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_dir).join(&self.tts_file)
    }

    /// `<data_dir>/<log_file>` — the append-only latency log.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}

fn normalize_name(value: &mut String, fallback: &str) {
    let trimmed = value.trim();
    *value = if trimmed.is_empty() {
        fallback.into()
    } else {
        trimmed.into()
    };
}

pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Voxloop")
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".local")
                    .join("share")
            })
            .join("voxloop")
    }
}

pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.json")
}

/// Load config from `path`, falling back to defaults when the file is
/// missing or unreadable. Always normalized.
pub fn load_config(path: &Path) -> SessionConfig {
    let mut config = fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str::<SessionConfig>(&raw).ok())
        .unwrap_or_default();
    config.normalize();
    config
}

pub fn save_config(path: &Path, config: &SessionConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_fixed_file_names() {
        let config = SessionConfig::default();
        assert_eq!(config.stt_file, "1_STT.json");
        assert_eq!(config.tts_file, "1_TTS.json");
        assert_eq!(config.log_file, "LatencyLog.txt");
        assert!(config.stt_path().ends_with("JSON/1_STT.json"));
        assert!(config.log_path().ends_with("LatencyLog.txt"));
    }

    #[test]
    fn normalize_restores_blank_fields() {
        let mut config = SessionConfig {
            stt_file: "   ".into(),
            lesson_id: String::new(),
            ..SessionConfig::default()
        };
        config.normalize();
        assert_eq!(config.stt_file, "1_STT.json");
        assert_eq!(config.lesson_id, "lesson-123");
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("nope.json"));
        assert_eq!(config.tts_file, "1_TTS.json");
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let mut config = SessionConfig::default();
        config.lesson_id = "lesson-999".into();
        save_config(&path, &config).expect("save config");

        let loaded = load_config(&path);
        assert_eq!(loaded.lesson_id, "lesson-999");
        assert_eq!(loaded.teacher_id, "teacher-456");
    }
}
