//! Storage access layer

pub mod memory;
pub mod user_repo;

pub use memory::MemoryCredentialStore;
pub use user_repo::{CredentialStore, PgCredentialStore};
