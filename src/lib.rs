//! Rescroll authentication service
//! Credential verification, token issuance, refresh rotation, and
//! cookie-based session propagation

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
