//! Token CLI commands.

use std::sync::Arc;

use chrono::Duration;
use clap::{Args, Subcommand};
use uuid::Uuid;

use chirpy_auth::{JwtDecoder, JwtEncoder, make_refresh_token};
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;
use chirpy_core::traits::SystemClock;
use chirpy_core::types::UserId;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue an access token for a user
    Issue {
        /// User ID
        user_id: Uuid,
        /// Lifetime in seconds, defaults to the configured access TTL
        #[arg(long, allow_negative_numbers = true)]
        ttl_seconds: Option<i64>,
    },
    /// Validate an access token and print its subject
    Validate {
        /// Compact JWT
        token: String,
    },
    /// Generate a fresh opaque refresh token value
    Refresh,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: AppConfig) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue {
            user_id,
            ttl_seconds,
        } => {
            config.auth.validate()?;
            let encoder = JwtEncoder::from_config(&config.auth, Arc::new(SystemClock));
            let user_id = UserId::from_uuid(*user_id);

            let access = match ttl_seconds {
                Some(secs) => {
                    let ttl = Duration::try_seconds(*secs).ok_or_else(|| {
                        AppError::validation(format!("--ttl-seconds {secs} is out of range"))
                    })?;
                    encoder.generate_with_ttl(user_id, ttl)?
                }
                None => encoder.generate_access_token(user_id)?,
            };

            tracing::info!(user_id = %user_id, expires_at = %access.expires_at, "Issued access token");
            println!("{}", access.token);
        }
        TokenCommand::Validate { token } => {
            config.auth.validate()?;
            let decoder = JwtDecoder::from_config(&config.auth, Arc::new(SystemClock));
            println!("{}", decoder.validate(token)?);
        }
        TokenCommand::Refresh => {
            println!("{}", make_refresh_token()?);
        }
    }

    Ok(())
}
