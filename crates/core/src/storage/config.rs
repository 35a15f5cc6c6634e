//! Flat-file storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use sarraf_shared::config::StorageSettings;

/// Where the collection files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Local filesystem directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory; contents vanish with the gateway.
    Memory,
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Flat-file gateway configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Prefix applied to every collection name.
    pub collection_prefix: Option<String>,
}

impl StorageConfig {
    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            collection_prefix: None,
        }
    }

    /// Builds the config for the data directory named in application settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(StorageProvider::local_fs(settings.data_dir.clone()))
            .with_collection_prefix(settings.collection_prefix.clone())
    }

    /// Set the collection prefix.
    #[must_use]
    pub fn with_collection_prefix(mut self, prefix: Option<String>) -> Self {
        self.collection_prefix = prefix;
        self
    }
}
