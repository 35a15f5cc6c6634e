//! Bank and hawala transfer ledger.
//!
//! This module implements the transfer lifecycle:
//! - Drafts and their validation rules
//! - Stored records and the status toggle
//! - One generic repository for both transfer kinds
//! - History views: date and channel filters, summaries, pagination
//! - The combined feed and the permission-gated service

pub mod draft;
pub mod error;
pub mod feed;
pub mod kind;
pub mod record;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;
pub mod view;

#[cfg(test)]
mod validation_props;

pub use draft::Draft;
pub use error::LedgerError;
pub use feed::{FeedEntry, TransactionSource, merge_feed};
pub use kind::{Bank, Hawala, TransactionKind};
pub use record::{
    BankDetails, BankTransaction, Counterparty, HawalaDetails, HawalaTransaction,
    TransactionRecord,
};
pub use repository::{BankRepository, HawalaRepository, RecordOf, TransactionRepository};
pub use service::{LedgerService, References, Transactions};
pub use types::{Currency, TransactionStatus, TransactionType};
pub use validation::{Submission, ValidationError, validate_bank, validate_hawala};
pub use view::{DateNavigation, FilterState, ListQuery, Summary, TransactionView, build_view};
