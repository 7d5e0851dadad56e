//! Password hashing CLI commands.

use clap::{Args, Subcommand};

use chirpy_auth::PasswordHasher;
use chirpy_core::config::AppConfig;
use chirpy_core::error::AppError;

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Hash a password with the configured Argon2id parameters
    Hash {
        /// Plaintext password
        password: String,
    },
    /// Check a password against a stored hash
    Verify {
        /// Plaintext password
        password: String,
        /// PHC hash string
        hash: String,
    },
}

/// Execute password commands
pub fn execute(args: &PasswordArgs, config: &AppConfig) -> Result<(), AppError> {
    let hasher = PasswordHasher::from_config(&config.auth)?;

    match &args.command {
        PasswordCommand::Hash { password } => {
            println!("{}", hasher.hash_password(password)?);
        }
        PasswordCommand::Verify { password, hash } => {
            if !hasher.verify_password(password, hash)? {
                return Err(AppError::authentication("Password does not match hash"));
            }
            println!("ok");
        }
    }

    Ok(())
}
