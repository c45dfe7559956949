//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;

/// whisper-gateway - caching transcription gateway for whisper.cpp
#[derive(Parser, Debug)]
#[command(name = "whisper-gateway")]
#[command(version)]
#[command(about = "Caching HTTP gateway that transcribes audio and video with FFmpeg and whisper.cpp")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(
        long = "config",
        id = "config_file",
        global = true,
        value_name = "PATH",
        env = "WHISPER_GATEWAY_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// Log format (text, json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeArgs),
    /// Transcribe a local file through the same cache
    Transcribe {
        /// Audio or video file
        file: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for the `serve` subcommand
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Maximum upload size in megabytes
    #[arg(long, value_name = "MB")]
    pub max_upload_mb: Option<u64>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Flags shared by every command that runs the pipeline
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineArgs {
    /// Directory holding cached artifacts
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Directory for transient files
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<String>,

    /// FFmpeg binary
    #[arg(long = "ffmpeg", value_name = "PATH")]
    pub ffmpeg_path: Option<String>,

    /// whisper-cli binary
    #[arg(long, value_name = "PATH")]
    pub whisper_executable: Option<String>,

    /// ggml model file
    #[arg(long, value_name = "PATH")]
    pub whisper_model: Option<String>,

    /// Kill FFmpeg or whisper-cli after this many seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub tool_timeout_secs: Option<u64>,
}

impl PipelineArgs {
    /// Config layer built from the flags that were given
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            cache_dir: self.cache_dir.clone(),
            temp_dir: self.temp_dir.clone(),
            ffmpeg_path: self.ffmpeg_path.clone(),
            whisper_executable: self.whisper_executable.clone(),
            whisper_model: self.whisper_model.clone(),
            tool_timeout_secs: self.tool_timeout_secs,
            ..Default::default()
        }
    }
}

impl ServeArgs {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            max_upload_mb: self.max_upload_mb,
            ..self.pipeline.to_config()
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "host",
    "port",
    "cache_dir",
    "temp_dir",
    "ffmpeg_path",
    "whisper_executable",
    "whisper_model",
    "max_upload_mb",
    "tool_timeout_secs",
    "log_format",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
