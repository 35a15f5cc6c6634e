//! Stored transfer records.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sarraf_shared::types::{Money, TransactionId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::types::{Currency, TransactionStatus, TransactionType};

/// A persisted transfer of either kind.
///
/// `D` carries the kind-specific fields and is flattened into the stored
/// document, so a record is one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord<D> {
    /// Assigned once at creation.
    pub id: TransactionId,
    /// Creation time. `None` when the stored value is missing or unreadable.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    /// Settlement status.
    #[serde(default)]
    pub status: TransactionStatus,
    /// Time of the latest edit or toggle; `None` on fresh records.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
    /// Transfer amount in `currency`.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub details: D,
}

impl<D> TransactionRecord<D> {
    /// The amount together with its currency.
    #[must_use]
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }

    /// UTC calendar date of creation.
    #[must_use]
    pub fn calendar_date(&self) -> Option<chrono::NaiveDate> {
        self.date.map(|date| date.date_naive())
    }
}

/// Fields specific to bank transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    /// Bank the transfer went through.
    pub bank_name: String,
    /// Account the transfer is booked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tax withheld, in the transfer's currency.
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax: Option<Decimal>,
}

/// Fields specific to hawala transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HawalaDetails {
    /// Hawala market that carried the transfer.
    pub market: String,
    /// Account the transfer is booked against.
    pub account_name: String,
    /// Purpose of the transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Reference note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nusinga: Option<String>,
}

/// The channel name a transfer is filtered by: the bank or the market.
pub trait Counterparty {
    /// Display name of the channel.
    fn counterparty(&self) -> &str;
}

impl Counterparty for BankDetails {
    fn counterparty(&self) -> &str {
        &self.bank_name
    }
}

impl Counterparty for HawalaDetails {
    fn counterparty(&self) -> &str {
        &self.market
    }
}

/// A bank transfer record.
pub type BankTransaction = TransactionRecord<BankDetails>;

/// A hawala transfer record.
pub type HawalaTransaction = TransactionRecord<HawalaDetails>;

impl BankTransaction {
    /// Amount after tax. Derived for display, never stored.
    ///
    /// `None` when the difference leaves the `Decimal` range.
    #[must_use]
    pub fn net_amount(&self) -> Option<Decimal> {
        self.amount
            .checked_sub(self.details.tax.unwrap_or(Decimal::ZERO))
    }
}

/// Sorts most recent first. Undated items go last; ties keep their order.
pub fn sort_most_recent_first<T>(items: &mut [T], date: impl Fn(&T) -> Option<DateTime<Utc>>) {
    // `None` orders below every `Some`, so a descending sort puts it last.
    items.sort_by(|a, b| date(b).cmp(&date(a)));
}

/// Reads a timestamp, treating anything unreadable as missing.
///
/// Accepts RFC 3339 and offset-less ISO 8601 (taken as UTC).
pub(crate) fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
