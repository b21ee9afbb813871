use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::credential::{
    DEFAULT_ITERATIONS, DEFAULT_SALT_LENGTH, MIN_ITERATIONS,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub hashing: HashingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Work factor stamped into newly created records
    pub iterations: u32,
    /// Salt length in bytes
    pub salt_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hashing: HashingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl HashingConfig {
    /// Reject work factors below the floor and empty salts
    ///
    /// The floor applies to newly created records only; verification
    /// honors whatever count an existing record carries.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.iterations < MIN_ITERATIONS {
            return Err(DomainError::configuration(format!(
                "Hashing iterations {} is below the minimum of {}",
                self.iterations, MIN_ITERATIONS
            )));
        }

        if self.salt_length == 0 {
            return Err(DomainError::configuration(
                "Salt length must be at least 1 byte",
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("CREDLOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;

        config
            .hashing
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(config)
    }
}
