//! Authentication orchestration: login, refresh, current-user resolution
//!
//! Composes the credential store, password hasher, and token service.
//! Every operation is recomputed per request from the presented token and
//! a fresh user lookup; no authentication state persists server-side.
//! Refresh tokens are not tracked or revocable — concurrent refreshes with
//! the same token can both succeed, and tokens die by signed expiry only.

use crate::{
    auth::jwt::{JwtService, TokenPair},
    auth::password::PasswordHasher,
    error::AppError,
    models::user::User,
    repository::CredentialStore,
};
use chrono::Utc;
use std::sync::Arc;

/// Well-formed Argon2id hash (same parameters as [`PasswordHasher`]) that
/// matches no password. Verified against on the unknown-email path so a
/// failed lookup costs the same as a real password check and cannot be
/// told apart by response time.
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=4$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    jwt: Arc<JwtService>,
    hasher: Arc<PasswordHasher>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        jwt: Arc<JwtService>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self { store, jwt, hasher }
    }

    /// Log a user in by email and password.
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`:
    /// the response must not reveal which identifiers are registered. A
    /// disabled account only surfaces as `InactiveAccount` after the
    /// password checked out.
    pub async fn login(&self, email: &str, password: &str) -> Result<(TokenPair, User), AppError> {
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                self.verify_password(password, DUMMY_HASH).await?;
                return Err(AppError::InvalidCredentials);
            }
        };

        let password_ok = self.verify_password(password, &user.hashed_password).await?;

        if !password_ok {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Login rejected: inactive account");
            return Err(AppError::InactiveAccount);
        }

        let pair = self.jwt.issue_pair(user.id, Utc::now())?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((pair, user))
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Any verifier failure collapses into `InvalidRefreshToken`, as does
    /// a subject that no longer resolves to a user. Success rotates both
    /// tokens; the old refresh token string is not reused (though it stays
    /// verifiable until its own expiry — see the module note).
    pub async fn refresh(&self, refresh_token: &str) -> Result<(TokenPair, User), AppError> {
        let claims = self.jwt.verify_refresh(refresh_token).map_err(|e| {
            tracing::debug!(reason = %e, "Refresh token rejected");
            AppError::InvalidRefreshToken
        })?;

        let user = self
            .store
            .find_by_id(claims.subject)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        let pair = self.jwt.issue_pair(user.id, Utc::now())?;

        tracing::debug!(user_id = %user.id, "Token pair rotated");

        Ok((pair, user))
    }

    /// Resolve the user behind an access token.
    ///
    /// The verifier sub-error (malformed, bad signature, expired, missing
    /// subject) is logged but deliberately not exposed: the caller only
    /// sees `NotAuthenticated`. A valid token whose user was deleted is
    /// the distinct, rarer `UserNotFound`.
    pub async fn resolve_current_user(&self, token: Option<&str>) -> Result<User, AppError> {
        let token = token.ok_or(AppError::NotAuthenticated)?;

        let claims = self.jwt.verify_access(token).map_err(|e| {
            tracing::debug!(reason = %e, "Access token rejected");
            AppError::NotAuthenticated
        })?;

        let user = self
            .store
            .find_by_id(claims.subject)
            .await?
            .ok_or(AppError::UserNotFound)?;

        Ok(user)
    }

    /// Argon2 verification takes tens of milliseconds by design; run it
    /// off the async worker threads.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
    }
}
