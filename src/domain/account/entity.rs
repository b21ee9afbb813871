//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_email, AccountValidationError};

/// Email address used as the account's identifying key
///
/// Normalized to lowercase on construction so lookups are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email after validation, lowercasing the input
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self(email.to_lowercase()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account entity for authentication
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Identifying key for lookups
    email: Email,
    /// Display name captured at registration
    full_name: String,
    /// Encoded credential hash record - never exposed in serialization
    #[serde(skip_serializing)]
    credential: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new account at registration time
    pub fn new(email: Email, full_name: impl Into<String>, credential: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            email,
            full_name: full_name.into(),
            credential: credential.into(),
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Rehydrate an account from persisted fields
    ///
    /// Used by stores mapping rows back into the entity; timestamps are
    /// taken as stored rather than reset.
    pub fn restore(
        email: Email,
        full_name: impl Into<String>,
        credential: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        last_login_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            email,
            full_name: full_name.into(),
            credential: credential.into(),
            created_at,
            updated_at,
            last_login_at,
        }
    }

    // Getters

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    // Mutators

    /// Update the display name
    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        self.touch();
    }

    /// Replace the credential record wholesale
    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
        self.touch();
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
