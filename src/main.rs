//! Chirpy operator CLI.
//!
//! Hashes and checks passwords, and issues and validates tokens, using the
//! same configuration the service runs with.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use chirpy_core::config::{AppConfig, LoggingConfig};

mod commands;

use commands::Cli;

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::read(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = cli.execute(config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
