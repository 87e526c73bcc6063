//! In-memory credential store for tests and local development
//!
//! Backs the integration test suite so the full router can be exercised
//! without a database.

use crate::{error::AppError, models::user::User};
use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use super::user_repo::CredentialStore;

#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<Vec<User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user record
    pub fn insert(&self, user: User) {
        self.users.write().expect("user store poisoned").push(user);
    }

    /// Remove a user, simulating deletion behind a still-valid token
    pub fn remove(&self, id: Uuid) {
        self.users
            .write()
            .expect("user store poisoned")
            .retain(|u| u.id != id);
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .expect("user store poisoned")
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .expect("user store poisoned")
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
