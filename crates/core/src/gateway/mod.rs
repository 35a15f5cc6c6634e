//! Persistence gateway: a uniform key-value collection contract.
//!
//! Repositories talk to storage only through [`DocumentGateway`]. Two
//! backends implement it: the flat-file backend in [`crate::storage`] and the
//! PostgreSQL document store in the db crate. Which one runs is decided once,
//! at construction time, from configuration.
//!
//! # Absent versus error
//!
//! `get_by_id` and `update` report a missing id as `Ok(None)`. Only
//! `delete_by_id` treats a missing id as [`GatewayError::NotFound`].
//!
//! # Uniqueness
//!
//! `insert` does not check for an existing id. A repeated id overwrites the
//! stored document; callers rely on the id generator instead.

mod error;

use std::collections::BTreeMap;
use std::future::Future;

use serde_json::{Map, Value};

pub use error::GatewayError;

/// A stored record as a JSON object.
pub type Document = Map<String, Value>;

/// Partial update: `None` marks a field the caller left absent.
pub type Patch = BTreeMap<String, Option<Value>>;

/// Field holding a document's id.
pub const ID_FIELD: &str = "id";

/// Logical collection names used by the ledger.
pub mod collections {
    /// Bank transfers.
    pub const BANK_TRANSACTIONS: &str = "bankTransactions";
    /// Hawala transfers.
    pub const HAWALA_TRANSACTIONS: &str = "hawalaTransactions";
    /// Bank reference entries.
    pub const BANKS: &str = "banks";
    /// Hawala market reference entries.
    pub const MARKETS: &str = "markets";
    /// Account reference entries.
    pub const ACCOUNTS: &str = "accounts";
}

/// Key-value collection store.
pub trait DocumentGateway: Send + Sync {
    /// Returns every document in the collection; empty if there are none.
    fn list_all(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Document>, GatewayError>> + Send;

    /// Returns the document with this id, or `None`.
    fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, GatewayError>> + Send;

    /// Stores a document that already carries its id.
    fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Merges `patch` into the stored document and returns the result, or
    /// `None` if the id does not exist.
    fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Patch,
    ) -> impl Future<Output = Result<Option<Document>, GatewayError>> + Send;

    /// Removes the document; fails with `NotFound` if the id does not exist.
    fn delete_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// Maps logical collection names to physical ones.
///
/// The mapping prepends a fixed prefix, so distinct logical names always map
/// to distinct physical names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionNamer {
    prefix: String,
}

impl CollectionNamer {
    /// Creates a namer; `None` and an empty prefix behave the same.
    #[must_use]
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// Physical name for a logical collection.
    #[must_use]
    pub fn physical(&self, logical: &str) -> String {
        format!("{}{logical}", self.prefix)
    }

    /// The configured prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Returns the document's id, if it has a string one.
#[must_use]
pub fn document_id(document: &Document) -> Option<&str> {
    document.get(ID_FIELD).and_then(Value::as_str)
}

/// Rewrites absent fields to explicit `null`.
///
/// The document store does not accept absent-valued fields.
#[must_use]
pub fn sanitize_patch(patch: Patch) -> Document {
    patch
        .into_iter()
        .map(|(field, value)| (field, value.unwrap_or(Value::Null)))
        .collect()
}

/// Merges a sanitized patch into a document, overwriting field by field.
pub fn merge_document(target: &mut Document, fields: Document) {
    for (field, value) in fields {
        target.insert(field, value);
    }
}

/// Merges a patch into a document, removing fields the patch marks absent.
///
/// This is how a file-backed collection stores absent fields: by omitting
/// them.
pub fn apply_patch(target: &mut Document, patch: Patch) {
    for (field, value) in patch {
        match value {
            Some(value) => {
                target.insert(field, value);
            }
            None => {
                target.remove(&field);
            }
        }
    }
}
