//! Session propagation — token extraction and the current-user extractor

use crate::{error::AppError, middleware::AppState, models::user::User};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::cookies::ACCESS_COOKIE;

/// Extract the access token from a request, stopping at the first hit:
///
/// 1. `Authorization: Bearer <token>` header — an API client presenting a
///    header explicitly wants it honored over any browser cookie;
/// 2. the `access_token` cookie, with surrounding quotes stripped when the
///    transport added them;
/// 3. the optionally configured extra session cookie.
///
/// No token is not an error; protected routes reject later with 401.
pub fn extract_token(
    headers: &HeaderMap,
    jar: &CookieJar,
    session_cookie: Option<&str>,
) -> Option<String> {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    if let Some(cookie) = jar.get(ACCESS_COOKIE) {
        return Some(strip_quotes(cookie.value()).to_string());
    }

    if let Some(name) = session_cookie {
        if let Some(cookie) = jar.get(name) {
            return Some(strip_quotes(cookie.value()).to_string());
        }
    }

    None
}

/// Some cookie transports wrap the value in double quotes
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// The authenticated user, resolved per request from the presented token
/// and a fresh store lookup. Nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = extract_token(
            &parts.headers,
            &jar,
            state.config.cookies.session_cookie_name.as_deref(),
        );

        let user = state
            .auth_service
            .resolve_current_user(token.as_deref())
            .await?;

        Ok(CurrentUser(user))
    }
}
