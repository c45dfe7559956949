//! Runners for the `serve` and `transcribe` commands

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tokio::net::TcpListener;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, GatewaySettings};
use crate::domain::error::ConfigError;
use crate::infrastructure::{create_pipeline, prepare_directories};
use crate::server::{self, AppState};

use super::args::VALID_CONFIG_KEYS;
use super::config_cmd::apply_config_value;
use super::presenter::Presenter;
use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_INTERRUPTED: u8 = 130;

/// Prefix for environment overrides, e.g. `WHISPER_GATEWAY_PORT`
pub const ENV_PREFIX: &str = "WHISPER_GATEWAY_";

/// Run the HTTP gateway until SIGINT/SIGTERM
pub async fn run_serve(settings: GatewaySettings) -> ExitCode {
    let presenter = Presenter::new();

    if let Err(e) = prepare_directories(&settings).await {
        presenter.error(&format!("Failed to create working directories: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let listener = match TcpListener::bind(settings.bind_addr()).await {
        Ok(l) => l,
        Err(e) => {
            presenter.error(&format!(
                "Failed to bind {}:{}: {}",
                settings.host, settings.port, e
            ));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr.to_string(),
        Err(_) => format!("{}:{}", settings.host, settings.port),
    };

    tracing::info!(
        addr = %addr,
        cache_dir = %settings.cache_dir.display(),
        temp_dir = %settings.temp_dir.display(),
        model = %settings.model_name(),
        "Gateway listening"
    );

    let pipeline = create_pipeline(&settings);
    let state = AppState::new(pipeline, settings);

    match server::serve(listener, state, shutdown_signal()).await {
        Ok(()) => {
            tracing::info!("Gateway stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&format!("Server error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Transcribe a local file through the same cache and print the caption
pub async fn run_transcribe(settings: GatewaySettings, file: &Path) -> ExitCode {
    let mut presenter = Presenter::new();

    let bytes = match tokio::fs::read(file).await {
        Ok(b) => b,
        Err(e) => {
            presenter.error(&format!("Cannot read {}: {}", file.display(), e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if let Err(e) = prepare_directories(&settings).await {
        presenter.error(&format!("Failed to create working directories: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let pipeline = create_pipeline(&settings);

    presenter.start_spinner(&format!("Transcribing {}...", filename));

    // Dropping the run on a signal kills the running tool and lets the
    // ledger remove the staged upload and any half-written audio.
    let result = tokio::select! {
        result = pipeline.submit(&filename, bytes) => result,
        _ = shutdown_signal() => {
            presenter.spinner_fail("Interrupted");
            return ExitCode::from(EXIT_INTERRUPTED);
        }
    };

    match result {
        Ok(outcome) => {
            if outcome.cached {
                presenter.spinner_success("Served from cache");
            } else {
                presenter.spinner_success("Transcription complete");
            }
            presenter.output(outcome.caption.as_str());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Transcription failed");
            presenter.error(&format!("{} [{}]", e, e.kind()));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Config layer read from `WHISPER_GATEWAY_*` variables
pub fn env_config() -> Result<AppConfig, ConfigError> {
    config_from_lookup(|name| env::var(name).ok())
}

/// Build a config layer from a variable lookup. Empty values are ignored.
pub fn config_from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::empty();
    for key in VALID_CONFIG_KEYS {
        let name = format!("{}{}", ENV_PREFIX, key.to_uppercase());
        if let Some(value) = lookup(&name).filter(|v| !v.trim().is_empty()) {
            apply_config_value(&mut config, key, &value).map_err(|e| match e {
                ConfigError::ValidationError { message, .. } => ConfigError::ValidationError {
                    key: name.clone(),
                    message,
                },
                other => other,
            })?;
        }
    }
    Ok(config)
}

/// Load and merge configuration: defaults < file < env < cli
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;
    let env_config = env_config()?;

    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config))
}
