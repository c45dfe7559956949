//! whisper-gateway entry point

use std::process::ExitCode;

use clap::Parser;

use whisper_gateway::cli::{
    app::{load_merged_config, run_serve, run_transcribe, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, ServeArgs},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use whisper_gateway::domain::config::{AppConfig, LogFormat};
use whisper_gateway::infrastructure::{init_tracing, XdgConfigStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let store = match &cli.config {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    let log_format = match cli.log_format.as_deref().map(str::parse::<LogFormat>) {
        Some(Ok(format)) => Some(format.as_str().to_string()),
        Some(Err(e)) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => None,
    };

    // No subcommand means serve
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(ServeArgs::default()));

    let (cli_config, file) = match command {
        Commands::Config { action } => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Commands::Serve(args) => (args.to_config(), None),
        Commands::Transcribe { file, pipeline } => (pipeline.to_config(), Some(file)),
    };

    let cli_config = AppConfig {
        log_format,
        ..cli_config
    };

    let config = match load_merged_config(&store, cli_config).await {
        Ok(c) => c,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let settings = config.resolve();
    init_tracing(settings.log_format);

    match file {
        Some(file) => run_transcribe(settings, &file).await,
        None => run_serve(settings).await,
    }
}
