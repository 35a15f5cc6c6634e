//! Generic transfer repository.
//!
//! One implementation serves both kinds; [`TransactionKind`] supplies the
//! collection, validator and editable fields. The repository upgrades the
//! gateway's "absent" answers into [`LedgerError::NotFound`].

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use sarraf_shared::types::TransactionId;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::draft::{Draft, fields};
use super::error::LedgerError;
use super::kind::{Bank, Hawala, TransactionKind};
use super::record::{TransactionRecord, sort_most_recent_first};
use super::types::TransactionStatus;
use super::validation::Submission;
use crate::gateway::{Document, DocumentGateway, Patch};

/// Record type stored by the repository for kind `K`.
pub type RecordOf<K> = TransactionRecord<<K as TransactionKind>::Details>;

/// Bank transfer repository.
pub type BankRepository<G> = TransactionRepository<G, Bank>;

/// Hawala transfer repository.
pub type HawalaRepository<G> = TransactionRepository<G, Hawala>;

/// Create, read, update, delete and toggle for one transfer kind.
pub struct TransactionRepository<G, K> {
    gateway: Arc<G>,
    kind: PhantomData<fn() -> K>,
}

impl<G, K> Clone for TransactionRepository<G, K> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            kind: PhantomData,
        }
    }
}

impl<G: DocumentGateway, K: TransactionKind> TransactionRepository<G, K> {
    /// Creates a repository over a shared gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            kind: PhantomData,
        }
    }

    /// Every record, most recent first. Undated records come last.
    pub async fn list(&self) -> Result<Vec<RecordOf<K>>, LedgerError> {
        let documents = self.gateway.list_all(K::COLLECTION).await?;
        debug!(kind = K::LABEL, count = documents.len(), "listing transactions");

        let mut records = documents
            .into_iter()
            .map(decode::<K>)
            .collect::<Result<Vec<_>, _>>()?;
        sort_most_recent_first(&mut records, |record| record.date);
        Ok(records)
    }

    /// Validates and stores a new record.
    ///
    /// `id`, `date` and `status` are always assigned here; a draft cannot
    /// supply them. Nothing is written when validation fails.
    pub async fn save(&self, draft: &Draft) -> Result<RecordOf<K>, LedgerError> {
        let submission = K::validate(draft).inspect_err(|err| {
            warn!(kind = K::LABEL, field = err.field, "rejected new transaction");
        })?;

        let Submission {
            amount,
            currency,
            transaction_type,
            details,
        } = submission;

        let record = TransactionRecord {
            id: TransactionId::new(),
            date: Some(Utc::now()),
            status: TransactionStatus::Pending,
            last_modified: None,
            amount,
            currency,
            transaction_type,
            details,
        };

        self.gateway.insert(K::COLLECTION, encode(&record)?).await?;
        info!(kind = K::LABEL, id = %record.id, "transaction saved");
        Ok(record)
    }

    /// Loads one record.
    pub async fn get_by_id(&self, id: &str) -> Result<RecordOf<K>, LedgerError> {
        match self.gateway.get_by_id(K::COLLECTION, id).await? {
            Some(document) => decode::<K>(document),
            None => {
                warn!(kind = K::LABEL, id, "transaction not found");
                Err(LedgerError::not_found(K::COLLECTION, id))
            }
        }
    }

    /// Replaces every editable field with the draft's values.
    ///
    /// The draft is validated in full, as for [`save`](Self::save). Optional
    /// fields left blank are cleared.
    pub async fn update(&self, id: &str, draft: &Draft) -> Result<RecordOf<K>, LedgerError> {
        let current = self.get_by_id(id).await?;
        let submission = K::validate(draft).inspect_err(|err| {
            warn!(kind = K::LABEL, id, field = err.field, "rejected transaction edit");
        })?;

        let edited = TransactionRecord {
            amount: submission.amount,
            currency: submission.currency,
            transaction_type: submission.transaction_type,
            details: submission.details,
            ..current.clone()
        };
        let mut document = encode(&edited)?;

        let mut patch: Patch = K::EDITABLE_FIELDS
            .iter()
            .map(|field| ((*field).to_string(), document.remove(*field)))
            .collect();
        patch.insert(
            fields::LAST_MODIFIED.to_string(),
            Some(timestamp(next_modification_stamp(current.last_modified))),
        );

        let updated = self.apply(id, patch).await?;
        info!(kind = K::LABEL, id, "transaction updated");
        Ok(updated)
    }

    /// Flips `pending` and `completed`. No other field changes.
    pub async fn toggle_status(&self, id: &str) -> Result<RecordOf<K>, LedgerError> {
        let current = self.get_by_id(id).await?;
        let status = current.status.toggled();

        let mut patch = Patch::new();
        patch.insert(
            fields::STATUS.to_string(),
            Some(Value::String(status.as_str().to_string())),
        );
        patch.insert(
            fields::LAST_MODIFIED.to_string(),
            Some(timestamp(next_modification_stamp(current.last_modified))),
        );

        let updated = self.apply(id, patch).await?;
        info!(kind = K::LABEL, id, from = %current.status, to = %status, "transaction status toggled");
        Ok(updated)
    }

    /// Removes a record for good.
    pub async fn delete(&self, id: &str) -> Result<(), LedgerError> {
        self.gateway.delete_by_id(K::COLLECTION, id).await?;
        info!(kind = K::LABEL, id, "transaction deleted");
        Ok(())
    }

    async fn apply(&self, id: &str, patch: Patch) -> Result<RecordOf<K>, LedgerError> {
        match self.gateway.update(K::COLLECTION, id, patch).await? {
            Some(document) => decode::<K>(document),
            // Deleted between the load and the write.
            None => Err(LedgerError::not_found(K::COLLECTION, id)),
        }
    }
}

/// Next `lastModified` value: now, or just after the previous stamp if the
/// clock has not moved past it.
fn next_modification_stamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if now <= previous => previous
            .checked_add_signed(TimeDelta::microseconds(1))
            .unwrap_or(previous),
        _ => now,
    }
}

fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339())
}

fn encode<D: serde::Serialize>(record: &TransactionRecord<D>) -> Result<Document, LedgerError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(LedgerError::Persistence(
            "record did not encode as an object".to_string(),
        )),
        Err(err) => Err(LedgerError::Persistence(err.to_string())),
    }
}

fn decode<K: TransactionKind>(document: Document) -> Result<RecordOf<K>, LedgerError> {
    serde_json::from_value(Value::Object(document)).map_err(|err| {
        warn!(kind = K::LABEL, error = %err, "unreadable stored transaction");
        LedgerError::Persistence(format!("unreadable record in {}: {err}", K::COLLECTION))
    })
}
