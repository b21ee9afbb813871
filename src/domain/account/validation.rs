//! Account validation utilities

use thiserror::Error;

/// Errors that can occur during account validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountValidationError {
    #[error("Email address cannot be empty")]
    EmptyEmail,

    #[error("Email address exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email address is not well-formed")]
    InvalidEmailFormat,

    #[error("Full name cannot be empty")]
    EmptyFullName,

    #[error("Full name exceeds maximum length of {0} characters")]
    FullNameTooLong(usize),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_FULL_NAME_LENGTH: usize = 100;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters
/// - No whitespace
/// - Exactly one '@' with non-empty local and domain parts
/// - Domain part contains at least one '.'
pub fn validate_email(email: &str) -> Result<(), AccountValidationError> {
    if email.is_empty() {
        return Err(AccountValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AccountValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(AccountValidationError::InvalidEmailFormat);
    }

    let mut parts = email.split('@');

    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(AccountValidationError::InvalidEmailFormat),
    };

    if local.is_empty() || domain.is_empty() {
        return Err(AccountValidationError::InvalidEmailFormat);
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(AccountValidationError::InvalidEmailFormat);
    }

    Ok(())
}

/// Validate a full name
///
/// Rules:
/// - Cannot be empty or whitespace-only
/// - Maximum 100 characters
pub fn validate_full_name(name: &str) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyFullName);
    }

    if name.len() > MAX_FULL_NAME_LENGTH {
        return Err(AccountValidationError::FullNameTooLong(MAX_FULL_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a password submitted at registration or password change
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), AccountValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AccountValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}
