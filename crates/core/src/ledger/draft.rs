//! Caller-submitted field maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field names used in drafts and stored records.
pub mod fields {
    /// Decimal amount as text.
    pub const AMOUNT: &str = "amount";
    /// Currency code.
    pub const CURRENCY: &str = "currency";
    /// `send` or `receive`.
    pub const TRANSACTION_TYPE: &str = "transactionType";
    /// Bank name on bank transfers.
    pub const BANK_NAME: &str = "bankName";
    /// Account name.
    pub const ACCOUNT_NAME: &str = "accountName";
    /// Free-text description on bank transfers.
    pub const DESCRIPTION: &str = "description";
    /// Tax withheld on bank transfers.
    pub const TAX: &str = "tax";
    /// Hawala market name.
    pub const MARKET: &str = "market";
    /// Purpose of a hawala transfer.
    pub const PURPOSE: &str = "purpose";
    /// Hawala reference note.
    pub const NUSINGA: &str = "nusinga";
    /// Stamped on every mutation after creation.
    pub const LAST_MODIFIED: &str = "lastModified";
    /// Settlement status.
    pub const STATUS: &str = "status";
}

/// A flat field-to-string mapping, as submitted by a form.
///
/// Values are kept verbatim; [`Draft::get`] trims on the way out and treats
/// blank values as missing. Numeric parsing is the repository's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Sets a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the trimmed value, or `None` if the field is missing or blank.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns the trimmed value as an owned string, if present.
    #[must_use]
    pub fn get_owned(&self, field: &str) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// Number of submitted fields, blank ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Draft
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}
