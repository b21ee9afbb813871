//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, Email};
use crate::domain::DomainError;

/// Repository trait for account storage
///
/// Stores treat the credential field as an opaque column value and return
/// it unmodified on lookup.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its email (for login)
    async fn get(&self, email: &Email) -> Result<Option<Account>, DomainError>;

    /// Create a new account
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Update an existing account
    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.get(email).await?.is_some())
    }

    /// Record a login for an account
    async fn record_login(&self, email: &Email) -> Result<(), DomainError>;
}
