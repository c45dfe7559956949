//! Resolved gateway settings

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("Invalid log format '{}'. Valid: text, json", other)),
        }
    }
}

/// Fully resolved settings. Every field has a concrete value.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub ffmpeg_path: PathBuf,
    pub whisper_executable: PathBuf,
    pub whisper_model: PathBuf,
    pub max_upload_bytes: usize,
    pub tool_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl GatewaySettings {
    /// Host and port to bind. The host may be a name or a bare IPv6 address.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Model file name, for the service descriptor
    pub fn model_name(&self) -> String {
        self.whisper_model
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
