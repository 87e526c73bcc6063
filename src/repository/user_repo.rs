//! Credential store access
//!
//! The auth core reads user records through this trait and never touches
//! the storage layer directly. Connectivity failures propagate as
//! `AppError::Database`, distinct from the auth error kinds.

use crate::{error::AppError, models::user::User};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Read-side contract the auth core needs from the user store
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by email, the login identifier
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look up a user by id, used when resolving a token subject
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Readiness probe
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed credential store
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_one(&self.db).await?;
        Ok(())
    }
}
