//! Domain layer - Core business logic and entities

pub mod account;
pub mod credential;
pub mod error;

pub use account::{
    validate_email, validate_full_name, validate_password, Account, AccountRepository,
    AccountValidationError, Email,
};
pub use credential::{CredentialRecord, RecordParseError, ALGORITHM_TAG};
pub use error::DomainError;
