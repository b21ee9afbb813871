//! Account domain
//!
//! This module provides domain types and traits for account
//! authentication: the account entity, validation, and the repository
//! trait implemented by the stores.

mod entity;
mod repository;
mod validation;

pub use entity::{Account, Email};
pub use repository::AccountRepository;
pub use validation::{
    validate_email, validate_full_name, validate_password, AccountValidationError,
};

#[cfg(test)]
pub use repository::mock::MockAccountRepository;
