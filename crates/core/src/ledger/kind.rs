//! The two transfer kinds.
//!
//! Bank and hawala transfers share one repository. What differs between them
//! is captured here: the collection, the validator, the editable fields and
//! the permissions guarding them.

use std::fmt::Debug;

use sarraf_shared::auth::Permission;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::draft::{Draft, fields};
use super::record::{BankDetails, Counterparty, HawalaDetails};
use super::validation::{Submission, ValidationError, validate_bank, validate_hawala};
use crate::gateway::collections;

/// Kind-specific configuration of a transfer repository.
pub trait TransactionKind: Send + Sync + 'static {
    /// Kind-specific record fields.
    type Details: Serialize
        + DeserializeOwned
        + Counterparty
        + Clone
        + Debug
        + PartialEq
        + Send
        + Sync;

    /// Logical collection name.
    const COLLECTION: &'static str;

    /// Name used in logs.
    const LABEL: &'static str;

    /// Fields an update overwrites. Server-assigned fields are never listed.
    const EDITABLE_FIELDS: &'static [&'static str];

    /// Permission needed to read records of this kind.
    const VIEW_PERMISSION: Permission;

    /// Permission needed to create, edit, toggle or delete.
    const MANAGE_PERMISSION: Permission;

    /// Validates a draft of this kind.
    fn validate(draft: &Draft) -> Result<Submission<Self::Details>, ValidationError>;
}

/// Transfers through a bank.
#[derive(Debug, Clone, Copy)]
pub struct Bank;

/// Transfers through a hawala market.
#[derive(Debug, Clone, Copy)]
pub struct Hawala;

impl TransactionKind for Bank {
    type Details = BankDetails;

    const COLLECTION: &'static str = collections::BANK_TRANSACTIONS;
    const LABEL: &'static str = "bank";
    const EDITABLE_FIELDS: &'static [&'static str] = &[
        fields::AMOUNT,
        fields::CURRENCY,
        fields::TRANSACTION_TYPE,
        fields::BANK_NAME,
        fields::ACCOUNT_NAME,
        fields::DESCRIPTION,
        fields::TAX,
    ];
    const VIEW_PERMISSION: Permission = Permission::ViewBankTransactions;
    const MANAGE_PERMISSION: Permission = Permission::ManageBankTransactions;

    fn validate(draft: &Draft) -> Result<Submission<BankDetails>, ValidationError> {
        validate_bank(draft)
    }
}

impl TransactionKind for Hawala {
    type Details = HawalaDetails;

    const COLLECTION: &'static str = collections::HAWALA_TRANSACTIONS;
    const LABEL: &'static str = "hawala";
    const EDITABLE_FIELDS: &'static [&'static str] = &[
        fields::AMOUNT,
        fields::CURRENCY,
        fields::TRANSACTION_TYPE,
        fields::MARKET,
        fields::ACCOUNT_NAME,
        fields::PURPOSE,
        fields::NUSINGA,
    ];
    const VIEW_PERMISSION: Permission = Permission::ViewHawalaTransactions;
    const MANAGE_PERMISSION: Permission = Permission::ManageHawalaTransactions;

    fn validate(draft: &Draft) -> Result<Submission<HawalaDetails>, ValidationError> {
        validate_hawala(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_editable(editable: &[&str]) {
        for field in ["id", "date", "status", "lastModified"] {
            assert!(!editable.contains(&field), "{field} must not be editable");
        }
    }

    #[test]
    fn test_server_fields_are_not_editable() {
        never_editable(Bank::EDITABLE_FIELDS);
        never_editable(Hawala::EDITABLE_FIELDS);
    }

    #[test]
    fn test_kinds_use_distinct_collections() {
        assert_ne!(Bank::COLLECTION, Hawala::COLLECTION);
        assert_eq!(Bank::COLLECTION, "bankTransactions");
        assert_eq!(Hawala::COLLECTION, "hawalaTransactions");
    }

    #[test]
    fn test_manage_permissions_differ_per_kind() {
        assert_ne!(Bank::MANAGE_PERMISSION, Hawala::MANAGE_PERMISSION);
        assert_ne!(Bank::VIEW_PERMISSION, Bank::MANAGE_PERMISSION);
    }
}
