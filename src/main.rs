//! Docask CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docask::cli::Cli;
use docask::domain::models::{LogFormat, LoggingConfig};
use docask::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Bare invocation: print usage and exit cleanly
    if cli.question.is_empty() && !cli.reset {
        let _ = Cli::command().print_help();
        return;
    }

    let config = match cli.config.as_ref() {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => docask::cli::handle_error(err),
    };

    init_tracing(&config.logging);

    if let Err(err) = docask::cli::run::execute(cli, config).await {
        docask::cli::handle_error(err);
    }
}

/// Logs go to stderr so stdout carries only the answer.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
