//! Flat-file gateway implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use crate::gateway::{
    CollectionNamer, Document, DocumentGateway, GatewayError, Patch, apply_patch, document_id,
};

/// Gateway keeping one JSON array file per collection.
pub struct FlatFileGateway {
    operator: Operator,
    namer: CollectionNamer,
    config: StorageConfig,
}

impl FlatFileGateway {
    /// Create a new flat-file gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, GatewayError> {
        let operator = Self::create_operator(&config.provider)?;
        let namer = CollectionNamer::new(config.collection_prefix.as_deref());
        Ok(Self {
            operator,
            namer,
            config,
        })
    }

    /// Create an in-memory gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the memory service cannot be initialized.
    pub fn in_memory() -> Result<Self, GatewayError> {
        Self::from_config(StorageConfig::new(StorageProvider::Memory))
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, GatewayError> {
        match provider {
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| GatewayError::backend("invalid data directory path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| GatewayError::backend(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| GatewayError::backend(e.to_string()))?
                .finish()
                .pipe(Ok),
        }
    }

    /// Storage key of a collection's file.
    ///
    /// Format: `{prefix}{collection}.json`
    #[must_use]
    pub fn collection_key(&self, collection: &str) -> String {
        format!("{}.json", self.namer.physical(collection))
    }

    /// Reads a whole collection. A missing or blank file is an empty one.
    async fn read_collection(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        let key = self.collection_key(collection);
        let bytes = match self.operator.read(&key).await {
            Ok(buffer) => buffer.to_vec(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replaces a whole collection.
    async fn write_collection(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<(), GatewayError> {
        let key = self.collection_key(collection);
        let bytes = serde_json::to_vec_pretty(documents)?;

        self.operator.write(&key, bytes).await?;
        debug!(key = %key, count = documents.len(), "collection file written");
        Ok(())
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

impl DocumentGateway for FlatFileGateway {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        self.read_collection(collection).await
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, GatewayError> {
        let documents = self.read_collection(collection).await?;
        Ok(documents
            .into_iter()
            .find(|doc| document_id(doc) == Some(id)))
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), GatewayError> {
        let id = document_id(&document)
            .ok_or(GatewayError::MissingId)?
            .to_string();
        let mut documents = self.read_collection(collection).await?;

        // Last write wins on a repeated id.
        match documents
            .iter_mut()
            .find(|doc| document_id(doc) == Some(id.as_str()))
        {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }

        self.write_collection(collection, &documents).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Patch,
    ) -> Result<Option<Document>, GatewayError> {
        let mut documents = self.read_collection(collection).await?;
        let Some(position) = documents.iter().position(|doc| document_id(doc) == Some(id)) else {
            return Ok(None);
        };

        apply_patch(&mut documents[position], patch);
        let updated = documents[position].clone();
        self.write_collection(collection, &documents).await?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        let mut documents = self.read_collection(collection).await?;
        let before = documents.len();
        documents.retain(|doc| document_id(doc) != Some(id));

        if documents.len() == before {
            return Err(GatewayError::not_found(collection, id));
        }

        self.write_collection(collection, &documents).await
    }
}

impl From<opendal::Error> for GatewayError {
    fn from(err: opendal::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
