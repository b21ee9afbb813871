//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::{Account, AccountRepository, Email};
use crate::domain::DomainError;

/// PostgreSQL implementation of AccountRepository
///
/// Expects an `accounts` table with the credential stored as an opaque
/// text column. Schema management is owned by the deployment, not this
/// crate.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT email, full_name, credential, created_at, updated_at, last_login_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (email, full_name, credential, created_at, updated_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.email().as_str())
        .bind(account.full_name())
        .bind(account.credential())
        .bind(account.created_at())
        .bind(account.updated_at())
        .bind(account.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e.to_string()) {
                DomainError::conflict(format!(
                    "Account '{}' already exists",
                    account.email().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to create account: {}", e))
            }
        })?;

        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET full_name = $2, credential = $3, updated_at = $4, last_login_at = $5
            WHERE email = $1
            "#,
        )
        .bind(account.email().as_str())
        .bind(account.full_name())
        .bind(account.credential())
        .bind(account.updated_at())
        .bind(account.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update account: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                account.email().as_str()
            )));
        }

        Ok(account.clone())
    }

    async fn record_login(&self, email: &Email) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET last_login_at = NOW() WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record login: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Account '{}' not found",
                email.as_str()
            )));
        }

        Ok(())
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<Account, DomainError> {
    let email: String = row.get("email");
    let full_name: String = row.get("full_name");
    let credential: String = row.get("credential");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");
    let last_login_at: Option<chrono::DateTime<chrono::Utc>> = row.get("last_login_at");

    let email = Email::new(&email)
        .map_err(|e| DomainError::storage(format!("Invalid email in database: {}", e)))?;

    Ok(Account::restore(
        email,
        full_name,
        credential,
        created_at,
        updated_at,
        last_login_at,
    ))
}

fn is_unique_violation(message: &str) -> bool {
    message.contains("duplicate key") || message.contains("unique constraint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_classification() {
        assert!(is_unique_violation(
            "error returned from database: duplicate key value violates unique constraint \"accounts_pkey\""
        ));
        assert!(is_unique_violation("unique constraint failed"));

        assert!(!is_unique_violation("connection refused"));
        assert!(!is_unique_violation("relation \"accounts\" does not exist"));
    }
}
