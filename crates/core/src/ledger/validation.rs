//! Validation rules for submitted transfers.
//!
//! Each rule parses a [`Draft`] into a typed [`Submission`] or fails with the
//! first problem found. The rules are pure: no storage, no clock.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use super::draft::{Draft, fields};
use super::record::{BankDetails, HawalaDetails};
use super::types::{Currency, TransactionType};

/// A submitted field failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, "is required")
    }
}

/// A draft that passed validation, with its fields parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<D> {
    /// Transfer amount.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Direction.
    pub transaction_type: TransactionType,
    /// Kind-specific fields.
    pub details: D,
}

/// Parses a decimal amount, plain or in scientific notation.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ValidationError::new(field, format!("'{raw}' is not a number")))
}

fn required<'a>(draft: &'a Draft, field: &'static str) -> Result<&'a str, ValidationError> {
    draft.get(field).ok_or_else(|| ValidationError::missing(field))
}

/// Checks amount, currency and direction, the fields both kinds share.
fn validate_common(draft: &Draft) -> Result<(Decimal, Currency, TransactionType), ValidationError> {
    let amount = parse_amount(fields::AMOUNT, required(draft, fields::AMOUNT)?)?;

    let currency = required(draft, fields::CURRENCY)?
        .parse::<Currency>()
        .map_err(|_| ValidationError::new(fields::CURRENCY, "must be one of USD, EUR, IQD"))?;

    let transaction_type = required(draft, fields::TRANSACTION_TYPE)?
        .parse::<TransactionType>()
        .map_err(|_| ValidationError::new(fields::TRANSACTION_TYPE, "must be send or receive"))?;

    Ok((amount, currency, transaction_type))
}

/// Validates a bank transfer draft.
///
/// Requires a numeric amount, a known currency, a direction and a bank name.
/// `tax`, when given, must be numeric.
pub fn validate_bank(draft: &Draft) -> Result<Submission<BankDetails>, ValidationError> {
    let (amount, currency, transaction_type) = validate_common(draft)?;
    let bank_name = required(draft, fields::BANK_NAME)?.to_string();
    let tax = draft
        .get(fields::TAX)
        .map(|raw| parse_amount(fields::TAX, raw))
        .transpose()?;

    Ok(Submission {
        amount,
        currency,
        transaction_type,
        details: BankDetails {
            bank_name,
            account_name: draft.get_owned(fields::ACCOUNT_NAME),
            description: draft.get_owned(fields::DESCRIPTION),
            tax,
        },
    })
}

/// Validates a hawala transfer draft.
///
/// Requires a numeric amount, a known currency, a direction, a market and an
/// account name.
pub fn validate_hawala(draft: &Draft) -> Result<Submission<HawalaDetails>, ValidationError> {
    let (amount, currency, transaction_type) = validate_common(draft)?;
    let market = required(draft, fields::MARKET)?.to_string();
    let account_name = required(draft, fields::ACCOUNT_NAME)?.to_string();

    Ok(Submission {
        amount,
        currency,
        transaction_type,
        details: HawalaDetails {
            market,
            account_name,
            purpose: draft.get_owned(fields::PURPOSE),
            nusinga: draft.get_owned(fields::NUSINGA),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn bank_draft() -> Draft {
        Draft::new()
            .with("amount", "1500.25")
            .with("currency", "USD")
            .with("transactionType", "send")
            .with("bankName", "Rafidain")
    }

    fn hawala_draft() -> Draft {
        Draft::new()
            .with("amount", "200")
            .with("currency", "IQD")
            .with("transactionType", "receive")
            .with("market", "Erbil")
            .with("accountName", "Karwan")
    }

    #[test]
    fn test_valid_bank_draft() {
        let submission = validate_bank(&bank_draft()).unwrap();
        assert_eq!(submission.amount, dec!(1500.25));
        assert_eq!(submission.currency, Currency::Usd);
        assert_eq!(submission.transaction_type, TransactionType::Send);
        assert_eq!(submission.details.bank_name, "Rafidain");
        assert_eq!(submission.details.tax, None);
        assert_eq!(submission.details.description, None);
    }

    #[test]
    fn test_bank_optional_fields_are_trimmed() {
        let draft = bank_draft()
            .with("description", "  salary  ")
            .with("accountName", " Main ")
            .with("tax", " 12.5 ");
        let details = validate_bank(&draft).unwrap().details;
        assert_eq!(details.description.as_deref(), Some("salary"));
        assert_eq!(details.account_name.as_deref(), Some("Main"));
        assert_eq!(details.tax, Some(dec!(12.5)));
    }

    #[test]
    fn test_bank_rejects_non_numeric_amount() {
        let draft = bank_draft().with("amount", "abc");
        let err = validate_bank(&draft).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn test_bank_rejects_non_numeric_tax() {
        let draft = bank_draft().with("tax", "ten");
        assert_eq!(validate_bank(&draft).unwrap_err().field, "tax");
    }

    #[rstest]
    #[case("amount")]
    #[case("currency")]
    #[case("transactionType")]
    #[case("bankName")]
    fn test_bank_requires_field(#[case] field: &'static str) {
        let draft = bank_draft().with(field, "   ");
        let err = validate_bank(&draft).unwrap_err();
        assert_eq!(err.field, field);
        assert_eq!(err.message, "is required");
    }

    #[rstest]
    #[case("amount")]
    #[case("currency")]
    #[case("transactionType")]
    #[case("market")]
    #[case("accountName")]
    fn test_hawala_requires_field(#[case] field: &'static str) {
        let draft = hawala_draft().with(field, "");
        assert_eq!(validate_hawala(&draft).unwrap_err().field, field);
    }

    #[rstest]
    #[case("GBP")]
    #[case("dollars")]
    fn test_rejects_unknown_currency(#[case] currency: &str) {
        let draft = bank_draft().with("currency", currency);
        assert_eq!(validate_bank(&draft).unwrap_err().field, "currency");
    }

    #[test]
    fn test_currency_is_case_insensitive() {
        let draft = hawala_draft().with("currency", "eur");
        assert_eq!(validate_hawala(&draft).unwrap().currency, Currency::Eur);
    }

    #[test]
    fn test_rejects_unknown_transaction_type() {
        let draft = hawala_draft().with("transactionType", "transfer");
        assert_eq!(
            validate_hawala(&draft).unwrap_err().field,
            "transactionType"
        );
    }

    #[test]
    fn test_valid_hawala_draft() {
        let submission = validate_hawala(&hawala_draft().with("nusinga", "N-77")).unwrap();
        assert_eq!(submission.details.market, "Erbil");
        assert_eq!(submission.details.account_name, "Karwan");
        assert_eq!(submission.details.nusinga.as_deref(), Some("N-77"));
        assert_eq!(submission.details.purpose, None);
    }

    #[rstest]
    #[case("1e3", dec!(1000))]
    #[case("-20", dec!(-20))]
    #[case("0.001", dec!(0.001))]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount("amount", raw).unwrap(), expected);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("amount", "'x' is not a number");
        assert_eq!(err.to_string(), "amount: 'x' is not a number");
    }
}
