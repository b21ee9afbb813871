//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountRepository, Email};
use crate::domain::DomainError;

/// In-memory implementation of AccountRepository
///
/// Accounts are keyed by their lowercased email. Intended for tests and
/// demos; nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository with initial accounts
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.email().as_str().to_string(), account))
            .collect();

        Self {
            accounts: Arc::new(RwLock::new(map)),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(email.as_str()).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        let email = account.email().as_str().to_string();

        if accounts.contains_key(&email) {
            return Err(DomainError::conflict(format!(
                "Account '{}' already exists",
                email
            )));
        }

        accounts.insert(email, account.clone());

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        let email = account.email().as_str().to_string();

        if !accounts.contains_key(&email) {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                email
            )));
        }

        accounts.insert(email, account.clone());

        Ok(account.clone())
    }

    async fn record_login(&self, email: &Email) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        if let Some(account) = accounts.get_mut(email.as_str()) {
            account.record_login();
            Ok(())
        } else {
            Err(DomainError::not_found(format!(
                "Account '{}' not found",
                email
            )))
        }
    }
}
