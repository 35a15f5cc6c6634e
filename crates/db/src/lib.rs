//! PostgreSQL document store for Sarraf.
//!
//! This crate provides:
//! - The `documents` table entity and its migration
//! - [`DocumentStoreGateway`], the core gateway over that table
//! - [`ConfiguredGateway`], which picks a backend from configuration

pub mod configured;
pub mod entities;
pub mod gateway;
pub mod migration;

pub use configured::ConfiguredGateway;
pub use gateway::DocumentStoreGateway;

use sarraf_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
