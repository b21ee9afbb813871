//! Verify command - checks a password against an existing credential record

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::credential::{PasswordHasher, Pbkdf2Hasher};
use crate::infrastructure::logging;

/// Arguments for the verify command
#[derive(Args, Clone)]
pub struct VerifyArgs {
    /// Password to check
    pub password: String,

    /// Credential record to check against
    pub record: String,
}

/// Verify a password against a record
///
/// Prints `match` or `no match` and exits non-zero on mismatch. Malformed
/// records count as a mismatch rather than an error.
pub async fn run(args: VerifyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config);

    // The record carries its own iteration count, so the configured
    // work factor does not apply here
    let hasher = Pbkdf2Hasher::new();

    let matched =
        tokio::task::spawn_blocking(move || hasher.verify(&args.password, &args.record)).await?;

    if matched {
        println!("match");
        Ok(())
    } else {
        println!("no match");
        std::process::exit(1);
    }
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });
}
