//! Hash command - derives a credential record from a password

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::credential::{PasswordHasher, Pbkdf2Hasher};
use crate::infrastructure::logging;

/// Arguments for the hash command
#[derive(Args, Clone)]
pub struct HashArgs {
    /// Password to derive a record from
    pub password: String,

    /// Override the configured iteration count
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Override the configured salt length in bytes
    #[arg(long)]
    pub salt_length: Option<usize>,
}

/// Derive a credential record and print it to stdout
pub async fn run(args: HashArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config);

    let mut hashing = config.hashing.clone();

    if let Some(iterations) = args.iterations {
        hashing.iterations = iterations;
    }

    if let Some(salt_length) = args.salt_length {
        hashing.salt_length = salt_length;
    }

    // Command-line overrides go through the same floor as config values
    hashing.validate()?;

    let hasher = Pbkdf2Hasher::new()
        .with_iterations(hashing.iterations)
        .with_salt_length(hashing.salt_length);

    let record = tokio::task::spawn_blocking(move || hasher.hash(&args.password)).await??;

    println!("{}", record);

    Ok(())
}

fn init_logging(config: &AppConfig) {
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });
}
