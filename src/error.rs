//! Unified error model
//! Defines the error taxonomy and the JSON error response shape

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application error type
///
/// `InvalidCredentials` covers both "no such user" and "wrong password" so
/// responses never reveal whether an email is registered. `InactiveAccount`
/// is the one deliberate exception: it only fires after a correct password,
/// when account existence is already implied.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive account")]
    InactiveAccount,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code. One code per condition: 401 for anything that
    /// needs (re-)authentication, 403 for a disabled account, 404 when a
    /// valid token references a deleted user.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InactiveAccount => StatusCode::FORBIDDEN,
            AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// User-facing message (no internals, no hashes, no raw tokens)
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Incorrect email or password".to_string(),
            AppError::InactiveAccount => "Inactive account".to_string(),
            AppError::NotAuthenticated => "Not authenticated".to_string(),
            AppError::InvalidRefreshToken => "Invalid refresh token".to_string(),
            AppError::UserNotFound => "User not found".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::debug!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        let mut response = (status, Json(error_response)).into_response();

        // Bearer challenge on auth failures, as browsers and API clients
        // both key off it
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
