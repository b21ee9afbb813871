//! Account infrastructure module
//!
//! This module provides the account stores (in-memory and PostgreSQL)
//! and the account service composing a store with the password hasher.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAccountRepository;
pub use repository::InMemoryAccountRepository;
pub use service::{AccountService, ChangePasswordRequest, RegisterAccountRequest};
