//! Authentication request/response DTOs

use crate::auth::jwt::TokenPair;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request. Email is the login identifier.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Refresh request body (the cookie, when present, takes precedence)
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair as returned to clients
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub refresh_token: String,
    /// Seconds until the access token expires
    pub expires_in: u64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            token_type: "bearer",
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }
    }
}
