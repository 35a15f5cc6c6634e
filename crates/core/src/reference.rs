//! Reference lists: banks, markets and accounts.
//!
//! Transfers name these entries by display name only. Nothing here enforces
//! that a name used on a transfer still exists.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sarraf_shared::types::ReferenceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::gateway::{DocumentGateway, collections};
use crate::ledger::LedgerError;
use crate::ledger::record::lenient_timestamp;

/// The three reference collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceCollection {
    /// Banks used by bank transfers.
    Banks,
    /// Hawala markets.
    Markets,
    /// Accounts transfers are booked against.
    Accounts,
}

impl ReferenceCollection {
    /// Every reference collection.
    pub const ALL: [Self; 3] = [Self::Banks, Self::Markets, Self::Accounts];

    /// Logical collection name.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Banks => collections::BANKS,
            Self::Markets => collections::MARKETS,
            Self::Accounts => collections::ACCOUNTS,
        }
    }
}

impl fmt::Display for ReferenceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// A named reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    /// Entry id.
    pub id: ReferenceId,
    /// Display name, trimmed.
    pub name: String,
    /// When the entry was added. `None` when missing or unreadable.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Why an entry was not added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The name was empty after trimming.
    BlankName,
    /// An entry with the same name exists, ignoring case.
    Duplicate {
        /// The existing entry.
        existing: ReferenceRecord,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => f.write_str("name must not be blank"),
            Self::Duplicate { existing } => write!(f, "'{}' already exists", existing.name),
        }
    }
}

/// Result of [`ReferenceRepository::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was stored.
    Added(ReferenceRecord),
    /// The entry was not stored.
    Rejected(RejectReason),
}

impl AddOutcome {
    /// Returns true if the entry was stored.
    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Lookup, add and delete for one reference collection.
pub struct ReferenceRepository<G> {
    gateway: Arc<G>,
    kind: ReferenceCollection,
}

impl<G> Clone for ReferenceRepository<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            kind: self.kind,
        }
    }
}

impl<G: DocumentGateway> ReferenceRepository<G> {
    /// Creates a repository for one collection.
    #[must_use]
    pub fn new(gateway: Arc<G>, kind: ReferenceCollection) -> Self {
        Self { gateway, kind }
    }

    /// Which collection this repository serves.
    #[must_use]
    pub fn kind(&self) -> ReferenceCollection {
        self.kind
    }

    /// Every entry, sorted by name ignoring case.
    pub async fn list_all(&self) -> Result<Vec<ReferenceRecord>, LedgerError> {
        let documents = self.gateway.list_all(self.kind.collection()).await?;
        let mut records = documents
            .into_iter()
            .map(|document| self.decode(document))
            .collect::<Result<Vec<_>, _>>()?;
        records.sort_by_cached_key(|record| record.name.to_lowercase());
        Ok(records)
    }

    /// Loads one entry.
    pub async fn get_by_id(&self, id: &str) -> Result<ReferenceRecord, LedgerError> {
        match self.gateway.get_by_id(self.kind.collection(), id).await? {
            Some(document) => self.decode(document),
            None => {
                warn!(collection = %self.kind, id, "reference entry not found");
                Err(LedgerError::not_found(self.kind.collection(), id))
            }
        }
    }

    /// Finds an entry by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<ReferenceRecord>, LedgerError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|record| record.name.to_lowercase() == wanted))
    }

    /// Display names in list order.
    pub async fn names(&self) -> Result<Vec<String>, LedgerError> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .map(|record| record.name)
            .collect())
    }

    /// Adds an entry unless the name is blank or already taken.
    pub async fn add(&self, name: &str) -> Result<AddOutcome, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddOutcome::Rejected(RejectReason::BlankName));
        }
        if let Some(existing) = self.find_by_name(name).await? {
            info!(collection = %self.kind, name, "duplicate reference entry rejected");
            return Ok(AddOutcome::Rejected(RejectReason::Duplicate { existing }));
        }

        let record = ReferenceRecord {
            id: ReferenceId::new(),
            name: name.to_string(),
            created_at: Some(Utc::now()),
        };
        let document = match serde_json::to_value(&record) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                return Err(LedgerError::Persistence(
                    "reference entry did not encode as an object".to_string(),
                ));
            }
            Err(err) => return Err(LedgerError::Persistence(err.to_string())),
        };

        self.gateway
            .insert(self.kind.collection(), document)
            .await?;
        info!(collection = %self.kind, id = %record.id, name, "reference entry added");
        Ok(AddOutcome::Added(record))
    }

    /// Removes an entry. Transfers naming it are left as they are.
    pub async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        self.gateway.delete_by_id(self.kind.collection(), id).await?;
        info!(collection = %self.kind, id, "reference entry deleted");
        Ok(())
    }

    fn decode(&self, document: crate::gateway::Document) -> Result<ReferenceRecord, LedgerError> {
        serde_json::from_value(Value::Object(document)).map_err(|err| {
            LedgerError::Persistence(format!(
                "unreadable record in {}: {err}",
                self.kind.collection()
            ))
        })
    }
}
