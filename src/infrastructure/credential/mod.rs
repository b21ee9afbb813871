//! Credential hashing infrastructure
//!
//! This module provides the PBKDF2-HMAC-SHA256 password hasher behind the
//! `PasswordHasher` trait, producing and verifying the encoded records
//! defined in the credential domain.

mod password;

pub use password::{
    PasswordHasher, Pbkdf2Hasher, DEFAULT_ITERATIONS, DEFAULT_SALT_LENGTH, MIN_ITERATIONS,
};

#[cfg(test)]
pub use password::MockPasswordHasher;
