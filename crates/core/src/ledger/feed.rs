//! Combined chronological feed of both transfer kinds.

use chrono::{DateTime, Utc};
use sarraf_shared::types::TransactionId;
use serde::Serialize;

use super::record::{BankTransaction, HawalaTransaction, sort_most_recent_first};
use super::types::TransactionStatus;

/// Which collection a feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    /// Bank transfers.
    Bank,
    /// Hawala transfers.
    Hawala,
}

/// A record tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum FeedEntry {
    /// A bank transfer.
    Bank(BankTransaction),
    /// A hawala transfer.
    Hawala(HawalaTransaction),
}

impl FeedEntry {
    /// Source discriminator.
    #[must_use]
    pub const fn source(&self) -> TransactionSource {
        match self {
            Self::Bank(_) => TransactionSource::Bank,
            Self::Hawala(_) => TransactionSource::Hawala,
        }
    }

    /// Record id; unique only within its source.
    #[must_use]
    pub fn id(&self) -> &TransactionId {
        match self {
            Self::Bank(record) => &record.id,
            Self::Hawala(record) => &record.id,
        }
    }

    /// Creation time.
    #[must_use]
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Bank(record) => record.date,
            Self::Hawala(record) => record.date,
        }
    }

    /// Settlement status.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        match self {
            Self::Bank(record) => record.status,
            Self::Hawala(record) => record.status,
        }
    }
}

/// Merges both lists into one feed, most recent first.
#[must_use]
pub fn merge_feed(bank: Vec<BankTransaction>, hawala: Vec<HawalaTransaction>) -> Vec<FeedEntry> {
    let mut feed: Vec<FeedEntry> = bank
        .into_iter()
        .map(FeedEntry::Bank)
        .chain(hawala.into_iter().map(FeedEntry::Hawala))
        .collect();
    sort_most_recent_first(&mut feed, FeedEntry::date);
    feed
}
