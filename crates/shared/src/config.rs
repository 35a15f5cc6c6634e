//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Persistence backend selection.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Database configuration, required by the document backend.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Which persistence backend the gateway is built on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// PostgreSQL document store.
    Document,
    /// One JSON array file per collection.
    #[default]
    FlatFile,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Active backend.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Prefix applied to every collection name.
    #[serde(default)]
    pub collection_prefix: Option<String>,
    /// Directory holding the flat-file collections.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            collection_prefix: None,
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SARRAF").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Checks that the selected backend has what it needs.
    pub fn validate(&self) -> AppResult<()> {
        match (self.storage.backend, &self.database) {
            (StorageBackend::Document, None) => Err(AppError::Configuration(
                "the document backend requires a database section".to_string(),
            )),
            (StorageBackend::Document, Some(db)) if db.url.trim().is_empty() => Err(
                AppError::Configuration("database.url must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}
