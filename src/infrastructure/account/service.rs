//! Account service for registration and login

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::account::{
    validate_full_name, validate_password, Account, AccountRepository, Email,
};
use crate::domain::DomainError;

use crate::infrastructure::credential::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Request for changing an account's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Account service for registration and authentication
///
/// Key derivation is CPU-bound, so every hash and verify call runs on a
/// blocking worker thread rather than the async executor.
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher + 'static> AccountService<R, H> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        // Validate email
        let email =
            Email::new(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;

        // Validate profile fields and password
        validate_full_name(&request.full_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        // Check if the email is already registered
        if self.repository.email_exists(&email).await? {
            return Err(DomainError::conflict(format!(
                "Account '{}' already exists",
                email
            )));
        }

        // Hash the password off the async executor
        let credential = self.hash_blocking(request.password).await?;

        let account = Account::new(email, &request.full_name, credential);
        let account = self.repository.create(account).await?;

        info!(email = %account.email(), "Account registered");

        Ok(account)
    }

    /// Authenticate an account with email and password
    ///
    /// Returns `Ok(None)` for an unknown email and for a wrong password
    /// alike, so callers cannot tell registered addresses apart from
    /// unregistered ones. Internal logs keep the distinction for
    /// operators.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, DomainError> {
        // An address that does not even parse cannot belong to an account
        let email = match Email::new(email) {
            Ok(email) => email,
            Err(e) => {
                debug!("Login rejected: {}", e);
                return Ok(None);
            }
        };

        // Look up the account
        let account = match self.repository.get(&email).await? {
            Some(account) => account,
            None => {
                debug!(email = %email, "Login rejected: unknown account");
                return Ok(None);
            }
        };

        // Verify the password off the async executor
        let verified = self
            .verify_blocking(password.to_string(), account.credential().to_string())
            .await?;

        if !verified {
            debug!(email = %email, "Login rejected: password mismatch");
            return Ok(None);
        }

        // Record login
        self.repository.record_login(&email).await?;

        // Re-fetch to get the updated last_login_at
        self.repository.get(&email).await
    }

    /// Get an account by email
    pub async fn get(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let email = Email::new(email).map_err(|e| DomainError::validation(e.to_string()))?;
        self.repository.get(&email).await
    }

    /// Change an account's password
    ///
    /// The stored record is superseded wholesale; no history is kept.
    pub async fn change_password(
        &self,
        email: &str,
        request: ChangePasswordRequest,
    ) -> Result<Account, DomainError> {
        let email = Email::new(email).map_err(|e| DomainError::validation(e.to_string()))?;

        // Get the account
        let mut account = self
            .repository
            .get(&email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", email)))?;

        // Verify the current password
        let verified = self
            .verify_blocking(
                request.current_password,
                account.credential().to_string(),
            )
            .await?;

        if !verified {
            return Err(DomainError::validation("Current password is incorrect"));
        }

        // Validate and hash the new password
        validate_password(&request.new_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let credential = self.hash_blocking(request.new_password).await?;
        account.set_credential(credential);

        self.repository.update(&account).await
    }

    async fn hash_blocking(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_blocking(&self, password: String, record: String) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.verify(&password, &record))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))
    }
}
