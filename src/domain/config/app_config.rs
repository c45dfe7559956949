//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::settings::{GatewaySettings, LogFormat};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_TEMP_DIR: &str = "temp";
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";
pub const DEFAULT_WHISPER_EXECUTABLE: &str = "whisper.cpp/build/bin/whisper-cli";
pub const DEFAULT_WHISPER_MODEL: &str = "whisper.cpp/models/ggml-base.en.bin";
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 512;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cache_dir: Option<String>,
    pub temp_dir: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub whisper_executable: Option<String>,
    pub whisper_model: Option<String>,
    pub max_upload_mb: Option<u64>,
    pub tool_timeout_secs: Option<u64>,
    pub log_format: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            cache_dir: Some(DEFAULT_CACHE_DIR.to_string()),
            temp_dir: Some(DEFAULT_TEMP_DIR.to_string()),
            ffmpeg_path: Some(DEFAULT_FFMPEG_PATH.to_string()),
            whisper_executable: Some(DEFAULT_WHISPER_EXECUTABLE.to_string()),
            whisper_model: Some(DEFAULT_WHISPER_MODEL.to_string()),
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            tool_timeout_secs: None,
            log_format: Some(LogFormat::Text.as_str().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            cache_dir: other.cache_dir.or(self.cache_dir),
            temp_dir: other.temp_dir.or(self.temp_dir),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
            whisper_executable: other.whisper_executable.or(self.whisper_executable),
            whisper_model: other.whisper_model.or(self.whisper_model),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            tool_timeout_secs: other.tool_timeout_secs.or(self.tool_timeout_secs),
            log_format: other.log_format.or(self.log_format),
        }
    }

    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn cache_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR))
    }

    pub fn temp_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.temp_dir.as_deref().unwrap_or(DEFAULT_TEMP_DIR))
    }

    pub fn ffmpeg_path_or_default(&self) -> PathBuf {
        PathBuf::from(self.ffmpeg_path.as_deref().unwrap_or(DEFAULT_FFMPEG_PATH))
    }

    pub fn whisper_executable_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.whisper_executable
                .as_deref()
                .unwrap_or(DEFAULT_WHISPER_EXECUTABLE),
        )
    }

    pub fn whisper_model_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.whisper_model
                .as_deref()
                .unwrap_or(DEFAULT_WHISPER_MODEL),
        )
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes_or_default(&self) -> usize {
        let mb = self.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// External tool timeout; `None` (and 0) means wait indefinitely
    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Log format, or text if not set/invalid
    pub fn log_format_or_default(&self) -> LogFormat {
        self.log_format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Resolve into the settings the gateway runs with
    pub fn resolve(&self) -> GatewaySettings {
        GatewaySettings {
            host: self.host_or_default().to_string(),
            port: self.port_or_default(),
            cache_dir: self.cache_dir_or_default(),
            temp_dir: self.temp_dir_or_default(),
            ffmpeg_path: self.ffmpeg_path_or_default(),
            whisper_executable: self.whisper_executable_or_default(),
            whisper_model: self.whisper_model_or_default(),
            max_upload_bytes: self.max_upload_bytes_or_default(),
            tool_timeout: self.tool_timeout(),
            log_format: self.log_format_or_default(),
        }
    }
}
