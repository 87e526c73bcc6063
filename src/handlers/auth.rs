//! Authentication HTTP handlers

use crate::{
    auth::cookies::REFRESH_COOKIE,
    auth::session::CurrentUser,
    error::AppError,
    middleware::AppState,
    models::auth::{LoginRequest, RefreshRequest, TokenResponse},
    models::user::UserResponse,
};
use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// POST /api/v1/auth/login
///
/// Returns the token pair in the body and sets both session cookies, so
/// header-based API clients and cookie-based browser sessions work off
/// the same endpoint.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (pair, _user) = state.auth_service.login(&req.email, &req.password).await?;

    let jar = state.cookies.set_pair(jar, &pair);

    Ok((jar, Json(TokenResponse::from(pair))))
}

/// POST /api/v1/auth/refresh
///
/// The refresh token comes from the `refresh_token` cookie when present,
/// falling back to the JSON body — the same cookie-first ordering clients
/// see elsewhere. An invalid token clears both cookies so the browser
/// drops its half-valid session and re-logs in.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Response {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().trim_matches('"').to_string())
        .or_else(|| body.map(|Json(b)| b.refresh_token));

    let Some(token) = token else {
        let jar = state.cookies.clear_pair(jar);
        return (jar, AppError::InvalidRefreshToken).into_response();
    };

    match state.auth_service.refresh(&token).await {
        Ok((pair, _user)) => {
            let jar = state.cookies.set_pair(jar, &pair);
            (jar, Json(TokenResponse::from(pair))).into_response()
        }
        Err(err @ AppError::InvalidRefreshToken) => {
            let jar = state.cookies.clear_pair(jar);
            (jar, err).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// POST /api/v1/auth/logout
///
/// Unconditional and idempotent: no token validation, always 200. The
/// clear-cookie attributes mirror the set-cookie attributes exactly.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let jar = state.cookies.clear_pair(jar);

    (jar, Json(json!({"message": "Successfully logged out"})))
}

/// GET /api/v1/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
