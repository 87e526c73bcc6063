//! User domain models
//!
//! One canonical user shape, owned by the credential store. The auth core
//! only reads it; creation and mutation live in the user-management
//! service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User account as stored by the credential store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,

    /// Argon2id PHC string. Never serialized, never logged.
    pub hashed_password: String,

    /// Inactive users fail authentication even with valid tokens
    pub is_active: bool,
    pub is_superuser: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user fields returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "alice@x.com".to_string(),
            username: "alice".to_string(),
            full_name: None,
            hashed_password: "$argon2id$v=19$secret".to_string(),
            is_active: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("hashed_password"));
        assert!(json.contains("alice@x.com"));
    }
}
