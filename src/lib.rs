//! Credlock
//!
//! Credential hashing service built on PBKDF2-HMAC-SHA256 with support for:
//! - Self-describing credential records carrying algorithm, work factor and salt
//! - Account registration and login with uniform failure responses
//! - In-memory and PostgreSQL account stores

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

pub use domain::{Account, AccountRepository, CredentialRecord, DomainError, Email};
pub use infrastructure::account::{
    AccountService, ChangePasswordRequest, InMemoryAccountRepository, PostgresAccountRepository,
    RegisterAccountRequest,
};
pub use infrastructure::credential::{PasswordHasher, Pbkdf2Hasher};
