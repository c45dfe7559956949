//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LogFormat};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!(
        "{} = {}",
        key,
        config_value(&config, key).unwrap_or_default()
    ));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            config_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid(key, format!("Expected a non-negative integer, got '{}'", value)))
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(key, "Value must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validate `value` for `key` and store it in `config`.
///
/// Shared by `config set` and the `WHISPER_GATEWAY_*` environment layer.
pub fn apply_config_value(
    config: &mut AppConfig,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    match key {
        "host" => config.host = Some(non_empty(key, value)?),
        "port" => {
            let port = value
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| invalid(key, format!("Expected a port in 1-65535, got '{}'", value)))?;
            config.port = Some(port);
        }
        "cache_dir" => config.cache_dir = Some(non_empty(key, value)?),
        "temp_dir" => config.temp_dir = Some(non_empty(key, value)?),
        "ffmpeg_path" => config.ffmpeg_path = Some(non_empty(key, value)?),
        "whisper_executable" => config.whisper_executable = Some(non_empty(key, value)?),
        "whisper_model" => config.whisper_model = Some(non_empty(key, value)?),
        "max_upload_mb" => {
            let mb = parse_u64(key, value)?;
            if mb == 0 {
                return Err(invalid(key, "Upload limit must be at least 1 MB"));
            }
            config.max_upload_mb = Some(mb);
        }
        "tool_timeout_secs" => config.tool_timeout_secs = Some(parse_u64(key, value)?),
        "log_format" => {
            let format = value.parse::<LogFormat>().map_err(|e| invalid(key, e))?;
            config.log_format = Some(format.as_str().to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }

    Ok(())
}

/// Render the stored value for `key`, if set
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "host" => config.host.clone(),
        "port" => config.port.map(|p| p.to_string()),
        "cache_dir" => config.cache_dir.clone(),
        "temp_dir" => config.temp_dir.clone(),
        "ffmpeg_path" => config.ffmpeg_path.clone(),
        "whisper_executable" => config.whisper_executable.clone(),
        "whisper_model" => config.whisper_model.clone(),
        "max_upload_mb" => config.max_upload_mb.map(|m| m.to_string()),
        "tool_timeout_secs" => config.tool_timeout_secs.map(|s| s.to_string()),
        "log_format" => config.log_format.clone(),
        _ => None,
    }
}
