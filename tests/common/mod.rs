//! Shared test helpers
//! Builds the application against the in-memory credential store so the
//! full router can be exercised without a database.

use chrono::Utc;
use rescroll_auth::{
    auth::{cookies::SessionCookies, jwt::JwtService, password::PasswordHasher},
    config::{
        AppConfig, CookieConfig, CorsConfig, DatabaseConfig, LoggingConfig, SecurityConfig,
        ServerConfig,
    },
    middleware::AppState,
    models::user::User,
    repository::MemoryCredentialStore,
    services::AuthService,
};
use secrecy::Secret;
use std::sync::Arc;
use uuid::Uuid;

/// Test configuration: lax/insecure cookies, short-ish TTLs
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://unused-in-tests".to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            access_token_secret: Secret::new(
                "test-access-secret-at-least-32-chars!".to_string(),
            ),
            refresh_token_secret: Secret::new(
                "test-refresh-secret-at-least-32-chars".to_string(),
            ),
            access_token_exp_mins: 5,
            refresh_token_exp_days: 1,
        },
        cookies: CookieConfig {
            domain: None,
            same_site: "lax".to_string(),
            secure: false,
            session_cookie_name: Some("rescroll_session".to_string()),
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
    }
}

/// Application state over an in-memory store; returns the store too so
/// tests can seed and delete users.
pub fn create_test_app_state() -> (Arc<AppState>, Arc<MemoryCredentialStore>) {
    let config = create_test_config();

    let jwt_service =
        Arc::new(JwtService::from_config(&config.security).expect("Failed to create JWT service"));
    let cookies = SessionCookies::new(
        &config.cookies,
        jwt_service.access_ttl_secs(),
        jwt_service.refresh_ttl_secs(),
    )
    .expect("Failed to create cookie service");

    let store = Arc::new(MemoryCredentialStore::new());
    let auth_service = Arc::new(AuthService::new(
        store.clone(),
        jwt_service.clone(),
        Arc::new(PasswordHasher::new()),
    ));

    let state = Arc::new(AppState {
        config,
        store: store.clone(),
        auth_service,
        jwt_service,
        cookies,
    });

    (state, store)
}

/// Seed a user and return its id
pub fn create_test_user(
    store: &MemoryCredentialStore,
    username: &str,
    email: &str,
    password: &str,
    is_active: bool,
) -> Uuid {
    let hasher = PasswordHasher::new();
    let id = Uuid::new_v4();

    store.insert(User {
        id,
        email: email.to_string(),
        username: username.to_string(),
        full_name: None,
        hashed_password: hasher.hash(password).expect("Failed to hash password"),
        is_active,
        is_superuser: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    });

    id
}
