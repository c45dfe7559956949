//! Domain error types

use thiserror::Error;

/// Error when an upload carries no usable filename
#[derive(Debug, Clone, Error)]
#[error("No file provided: invalid upload filename \"{filename}\"")]
pub struct InvalidUploadError {
    pub filename: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
