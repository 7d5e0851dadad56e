//! CLI command definitions and dispatch.

pub mod password;
pub mod token;

use clap::{Parser, Subcommand};

use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;

/// Chirpy authentication tooling
#[derive(Debug, Parser)]
#[command(name = "chirpy", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Password hashing
    Password(password::PasswordArgs),
    /// Access and refresh tokens
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Password(args) => password::execute(args, &config),
            Commands::Token(args) => token::execute(args, config),
        }
    }
}
