//! Session cookie pair — set and clear the httpOnly auth cookies
//!
//! The same attribute set (domain, path, SameSite, Secure) is applied on
//! both set and clear. Browsers only remove a cookie when the clearing
//! attributes match the ones it was set with, so the symmetry here is a
//! correctness requirement, not cosmetics.

use crate::{config::CookieConfig, error::AppError};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

use super::jwt::TokenPair;

/// Cookie name for the access token
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie name for the refresh token
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Builds the session cookie pair from deployment configuration
#[derive(Clone)]
pub struct SessionCookies {
    domain: Option<String>,
    same_site: SameSite,
    secure: bool,
    access_max_age: Duration,
    refresh_max_age: Duration,
}

impl SessionCookies {
    pub fn new(
        config: &CookieConfig,
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
    ) -> Result<Self, AppError> {
        let same_site = match config.same_site.to_lowercase().as_str() {
            "lax" => SameSite::Lax,
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            other => {
                return Err(AppError::Config(format!(
                    "invalid cookies.same_site: {other}"
                )))
            }
        };

        Ok(Self {
            domain: config.domain.clone(),
            same_site,
            secure: config.secure,
            access_max_age: Duration::seconds(access_ttl_secs as i64),
            refresh_max_age: Duration::seconds(refresh_ttl_secs as i64),
        })
    }

    /// Shared attribute set. Every cookie this service emits, set or
    /// clear, goes through here.
    fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        let mut builder = Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .path("/");

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }

        builder.build()
    }

    /// Access token cookie (bare token value, no "Bearer " prefix)
    pub fn access(&self, token: &str) -> Cookie<'static> {
        let mut cookie = self.build(ACCESS_COOKIE, token.to_string());
        cookie.set_max_age(self.access_max_age);
        cookie.set_expires(OffsetDateTime::now_utc() + self.access_max_age);
        cookie
    }

    /// Refresh token cookie
    pub fn refresh(&self, token: &str) -> Cookie<'static> {
        let mut cookie = self.build(REFRESH_COOKIE, token.to_string());
        cookie.set_max_age(self.refresh_max_age);
        cookie.set_expires(OffsetDateTime::now_utc() + self.refresh_max_age);
        cookie
    }

    /// Expired replacement used to clear a cookie client-side
    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new());
        cookie.set_max_age(Duration::ZERO);
        cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
        cookie
    }

    /// Add both session cookies to the jar after login or refresh
    pub fn set_pair(&self, jar: CookieJar, pair: &TokenPair) -> CookieJar {
        jar.add(self.access(&pair.access_token))
            .add(self.refresh(&pair.refresh_token))
    }

    /// Clear both session cookies (logout, invalid refresh token)
    pub fn clear_pair(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal(ACCESS_COOKIE))
            .add(self.removal(REFRESH_COOKIE))
    }
}
