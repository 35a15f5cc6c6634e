//! Backend selection from configuration.

use sarraf_core::gateway::{Document, DocumentGateway, GatewayError, Patch};
use sarraf_core::storage::{FlatFileGateway, StorageConfig};
use sarraf_shared::config::{AppConfig, StorageBackend};
use sarraf_shared::error::{AppError, AppResult};
use tracing::info;

use crate::{DocumentStoreGateway, connect};

/// The gateway the configuration selected.
///
/// Repositories are generic over [`DocumentGateway`]; this enum lets a
/// binary pick the backend at startup without naming a concrete type.
pub enum ConfiguredGateway {
    /// PostgreSQL document store.
    Document(DocumentStoreGateway),
    /// JSON files through OpenDAL.
    FlatFile(FlatFileGateway),
}

impl ConfiguredGateway {
    /// Builds the backend named by `config.storage.backend`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for incomplete settings and a
    /// persistence error if the database is unreachable.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;

        match (config.storage.backend, &config.database) {
            (StorageBackend::Document, Some(database)) => {
                let db = connect(database)
                    .await
                    .map_err(|e| AppError::Persistence(e.to_string()))?;
                info!(
                    prefix = config.storage.collection_prefix.as_deref().unwrap_or(""),
                    "using document store backend"
                );
                Ok(Self::Document(DocumentStoreGateway::new(
                    db,
                    config.storage.collection_prefix.as_deref(),
                )))
            }
            (StorageBackend::Document, None) => Err(AppError::Configuration(
                "the document backend requires a database section".to_string(),
            )),
            (StorageBackend::FlatFile, _) => {
                let gateway = FlatFileGateway::from_config(StorageConfig::from_settings(
                    &config.storage,
                ))
                .map_err(|e| AppError::Configuration(e.to_string()))?;
                info!(
                    provider = gateway.provider_name(),
                    data_dir = %config.storage.data_dir.display(),
                    "using flat-file backend"
                );
                Ok(Self::FlatFile(gateway))
            }
        }
    }

    /// Which backend is active.
    #[must_use]
    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::Document(_) => StorageBackend::Document,
            Self::FlatFile(_) => StorageBackend::FlatFile,
        }
    }
}

impl DocumentGateway for ConfiguredGateway {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        match self {
            Self::Document(gateway) => gateway.list_all(collection).await,
            Self::FlatFile(gateway) => gateway.list_all(collection).await,
        }
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, GatewayError> {
        match self {
            Self::Document(gateway) => gateway.get_by_id(collection, id).await,
            Self::FlatFile(gateway) => gateway.get_by_id(collection, id).await,
        }
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), GatewayError> {
        match self {
            Self::Document(gateway) => gateway.insert(collection, document).await,
            Self::FlatFile(gateway) => gateway.insert(collection, document).await,
        }
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Patch,
    ) -> Result<Option<Document>, GatewayError> {
        match self {
            Self::Document(gateway) => gateway.update(collection, id, patch).await,
            Self::FlatFile(gateway) => gateway.update(collection, id, patch).await,
        }
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        match self {
            Self::Document(gateway) => gateway.delete_by_id(collection, id).await,
            Self::FlatFile(gateway) => gateway.delete_by_id(collection, id).await,
        }
    }
}
