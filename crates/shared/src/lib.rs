//! Shared types, errors, and configuration for Sarraf.
//!
//! This crate provides common types used across all other crates:
//! - Money and currency types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for list views
//! - The authenticated principal and its permission set
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{Page, Permission, Principal};
pub use config::{AppConfig, StorageBackend};
pub use error::{AppError, AppResult};
