//! JWT token issuance and verification
//! Implements the access token + refresh token pattern with one signing
//! secret per token kind

use crate::{config::SecurityConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims as they travel on the wire. `sub` is optional on decode so a
/// token without a subject surfaces as `MissingSubject` rather than a
/// generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,

    /// Issued at (seconds since epoch)
    iat: i64,

    /// Expiration (seconds since epoch)
    exp: i64,
}

/// Decoded, validated claims
#[derive(Debug, Clone)]
pub struct Claims {
    /// The user id the token asserts identity for
    pub subject: Uuid,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Verifier failures, each distinct. Callers map these to their own error
/// kinds at the orchestration boundary; they are never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is not a well-formed JWT")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token subject is missing or not a user id")]
    MissingSubject,
}

/// Token pair handed out on login and refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires
    pub expires_in: u64,
}

/// JWT service holding the derived keys for both token kinds
pub struct JwtService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    /// Derive keys from config. Secret length and distinctness are
    /// enforced by config validation before we get here.
    pub fn from_config(security: &SecurityConfig) -> Result<Self, AppError> {
        let access_secret = security.access_token_secret.expose_secret();
        let refresh_secret = security.refresh_token_secret.expose_secret();

        if access_secret.len() < 32 || refresh_secret.len() < 32 {
            return Err(AppError::Config(
                "token secrets too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(security.access_token_exp_mins as i64),
            refresh_ttl: Duration::days(security.refresh_token_exp_days as i64),
        })
    }

    /// Access token lifetime in seconds (for `expires_in` and cookie Max-Age)
    pub fn access_ttl_secs(&self) -> u64 {
        self.access_ttl.num_seconds() as u64
    }

    /// Refresh token lifetime in seconds (for cookie Max-Age)
    pub fn refresh_ttl_secs(&self) -> u64 {
        self.refresh_ttl.num_seconds() as u64
    }

    /// Issue an access token for `user_id` with `exp = now + access_ttl`
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        self.issue(user_id, now, self.access_ttl, &self.access_encoding)
    }

    /// Issue a refresh token for `user_id` with `exp = now + refresh_ttl`
    pub fn issue_refresh_token(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        self.issue(user_id, now, self.refresh_ttl, &self.refresh_encoding)
    }

    /// Issue both tokens at the same instant
    pub fn issue_pair(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user_id, now)?,
            refresh_token: self.issue_refresh_token(user_id, now)?,
            expires_in: self.access_ttl_secs(),
        })
    }

    fn issue(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        ttl: Duration,
        key: &EncodingKey,
    ) -> Result<String, AppError> {
        let claims = RawClaims {
            sub: Some(user_id.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {e}"))
        })
    }

    /// Verify a token against the access secret
    pub fn verify_access(&self, token: &str) -> Result<Claims, VerifyError> {
        Self::verify(token, &self.access_decoding)
    }

    /// Verify a token against the refresh secret
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, VerifyError> {
        Self::verify(token, &self.refresh_decoding)
    }

    fn verify(token: &str, key: &DecodingKey) -> Result<Claims, VerifyError> {
        // jsonwebtoken checks the signature before validating claims,
        // which is the ordering contract we rely on: an expired token and
        // a forged token are both rejected, but expiry is only consulted
        // once the signature holds. Zero leeway keeps the expiry boundary
        // exact.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<RawClaims>(token, key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerifyError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => VerifyError::BadSignature,
            _ => VerifyError::Malformed,
        })?;

        // jsonwebtoken accepts exp == now; a token must already be invalid
        // at its expiry instant, so the boundary second is rejected here
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(VerifyError::Expired);
        }

        let subject = data
            .claims
            .sub
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or(VerifyError::MissingSubject)?;

        Ok(Claims {
            subject,
            issued_at: data.claims.iat,
            expires_at: data.claims.exp,
        })
    }
}
