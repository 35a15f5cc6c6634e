//! Gateway error types.

use thiserror::Error;

/// Persistence gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No document with this id exists in the collection.
    #[error("no document {id} in collection {collection}")]
    NotFound {
        /// Logical collection name.
        collection: String,
        /// Document id.
        id: String,
    },

    /// Document was handed to `insert` without a string `id` field.
    #[error("document has no id")]
    MissingId,

    /// Stored content could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Backend unreachable or rejected the operation.
    #[error("backend operation failed: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
