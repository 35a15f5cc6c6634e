//! Property-based tests for the transfer validation rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::draft::Draft;
use super::types::Currency;
use super::validation::{validate_bank, validate_hawala};

/// Strategy for amounts with two decimal places, sign included.
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Usd), Just(Currency::Eur), Just(Currency::Iqd)]
}

fn direction() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("send"), Just("receive")]
}

/// Non-blank names with surrounding whitespace.
fn padded_name() -> impl Strategy<Value = (String, String)> {
    ("[A-Za-z][A-Za-z ]{0,20}[A-Za-z]", " {0,3}", " {0,3}")
        .prop_map(|(name, left, right)| (format!("{left}{name}{right}"), name))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any numeric amount with a known currency and direction is accepted,
    /// and parses back to the same value.
    #[test]
    fn prop_valid_bank_drafts_accepted(
        amount in amount(),
        currency in currency(),
        direction in direction(),
        (padded, name) in padded_name(),
    ) {
        let draft = Draft::new()
            .with("amount", amount.to_string())
            .with("currency", currency.code())
            .with("transactionType", direction)
            .with("bankName", padded);

        let submission = validate_bank(&draft).unwrap();
        prop_assert_eq!(submission.amount, amount);
        prop_assert_eq!(submission.currency, currency);
        prop_assert_eq!(submission.details.bank_name, name);
    }

    /// Alphabetic amounts are always rejected on the amount field.
    #[test]
    fn prop_alphabetic_amount_rejected(raw in "[a-zA-Z]{1,12}") {
        let draft = Draft::new()
            .with("amount", raw)
            .with("currency", "USD")
            .with("transactionType", "send")
            .with("market", "Erbil")
            .with("accountName", "Karwan");

        let err = validate_hawala(&draft).unwrap_err();
        prop_assert_eq!(err.field, "amount");
    }

    /// Currency codes outside USD, EUR and IQD are rejected.
    #[test]
    fn prop_unknown_currency_rejected(code in "[A-Z]{3}") {
        prop_assume!(!["USD", "EUR", "IQD"].contains(&code.as_str()));
        let draft = Draft::new()
            .with("amount", "10")
            .with("currency", code)
            .with("transactionType", "receive")
            .with("bankName", "Rasheed");

        prop_assert_eq!(validate_bank(&draft).unwrap_err().field, "currency");
    }

    /// Whitespace-only hawala account names are missing names.
    #[test]
    fn prop_blank_account_name_rejected(blank in "[ \t]{0,5}") {
        let draft = Draft::new()
            .with("amount", "10")
            .with("currency", "IQD")
            .with("transactionType", "send")
            .with("market", "Sulaymaniyah")
            .with("accountName", blank);

        prop_assert_eq!(validate_hawala(&draft).unwrap_err().field, "accountName");
    }
}
