//! History view model: filter by date and channel, summarize, paginate.
//!
//! Input is a repository's full list, already most recent first. Nothing
//! here touches storage.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound::{Excluded, Unbounded};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sarraf_shared::types::{Money, PageRequest, PageResponse};
use tracing::warn;

use super::record::{Counterparty, TransactionRecord};
use super::types::{Currency, TransactionType};

/// What the caller asked to see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// UTC calendar date to show.
    pub date: Option<NaiveDate>,
    /// Exact bank or market name.
    pub counterparty: Option<String>,
    /// 1-indexed page. Zero reads as the first page.
    pub page: u32,
}

impl ListQuery {
    /// Query for one calendar date, first page.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            counterparty: None,
            page: 1,
        }
    }

    /// Restricts to one bank or market.
    #[must_use]
    pub fn with_counterparty(mut self, name: impl Into<String>) -> Self {
        self.counterparty = Some(name.into());
        self
    }

    /// Selects a page.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    fn is_filtered(&self) -> bool {
        self.date.is_some() || self.counterparty.is_some()
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::page(self.page.max(1))
    }
}

/// Whether filters are active and whether they matched anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// No date or channel filter was given.
    Unset,
    /// Filters matched at least one record.
    Matched,
    /// Filters matched nothing: "no records for this date".
    NoMatches,
}

/// Sums of `amount` per direction and currency.
///
/// A bucket whose sum leaves the `Decimal` range stops at `Decimal::MAX` (or
/// `MIN`) and is reported by [`is_saturated`](Self::is_saturated).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    totals: BTreeMap<(TransactionType, Currency), Money>,
    saturated: BTreeSet<(TransactionType, Currency)>,
}

impl Summary {
    /// Sums the given records. Currencies are never converted.
    pub fn of<'a, D: 'a>(records: impl IntoIterator<Item = &'a TransactionRecord<D>>) -> Self {
        let mut summary = Self::default();
        for record in records {
            let key = (record.transaction_type, record.currency);
            if summary.saturated.contains(&key) {
                continue;
            }

            let total = summary
                .totals
                .entry(key)
                .or_insert_with(|| Money::zero(record.currency));
            match total.checked_add(&record.money()) {
                Some(sum) => *total = sum,
                None => {
                    total.amount = if record.amount.is_sign_negative() {
                        Decimal::MIN
                    } else {
                        Decimal::MAX
                    };
                    summary.saturated.insert(key);
                    warn!(
                        transaction_type = %record.transaction_type,
                        currency = %record.currency,
                        "summary total out of range"
                    );
                }
            }
        }
        summary
    }

    /// Total for one bucket; zero if nothing fell in it.
    #[must_use]
    pub fn total(&self, transaction_type: TransactionType, currency: Currency) -> Decimal {
        self.totals
            .get(&(transaction_type, currency))
            .map_or(Decimal::ZERO, |money| money.amount)
    }

    /// Returns true if the bucket's sum overflowed and was clamped.
    #[must_use]
    pub fn is_saturated(&self, transaction_type: TransactionType, currency: Currency) -> bool {
        self.saturated.contains(&(transaction_type, currency))
    }

    /// Non-empty buckets in (direction, currency) order.
    pub fn buckets(&self) -> impl Iterator<Item = (TransactionType, Currency, Decimal)> + '_ {
        self.totals
            .iter()
            .map(|(&(transaction_type, currency), money)| {
                (transaction_type, currency, money.amount)
            })
    }
}

/// Adjacent-date navigation over the dates that have records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateNavigation {
    /// Distinct dates with records, newest first.
    pub available: Vec<NaiveDate>,
    /// Closest older date with records.
    pub previous: Option<NaiveDate>,
    /// Closest newer date with records.
    pub next: Option<NaiveDate>,
}

impl DateNavigation {
    /// Builds navigation around `selected`, which need not have records.
    #[must_use]
    pub fn around<D>(records: &[TransactionRecord<D>], selected: Option<NaiveDate>) -> Self {
        let dates: BTreeSet<NaiveDate> = records
            .iter()
            .filter_map(TransactionRecord::calendar_date)
            .collect();

        let (previous, next) = match selected {
            Some(day) => (
                dates.range(..day).next_back().copied(),
                dates.range((Excluded(day), Unbounded)).next().copied(),
            ),
            None => (None, None),
        };

        Self {
            available: dates.into_iter().rev().collect(),
            previous,
            next,
        }
    }

    /// Newest date with records; the default landing date.
    #[must_use]
    pub fn latest(&self) -> Option<NaiveDate> {
        self.available.first().copied()
    }
}

/// One rendered page of a history view.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView<D> {
    /// The requested page of the filtered records.
    pub page: PageResponse<TransactionRecord<D>>,
    /// Totals over every filtered record, not only this page.
    pub summary: Summary,
    /// Date navigation over the full list.
    pub navigation: DateNavigation,
    /// Filter outcome.
    pub state: FilterState,
}

impl<D> TransactionView<D> {
    /// Returns true when filters were given and nothing matched.
    #[must_use]
    pub fn is_no_matches(&self) -> bool {
        self.state == FilterState::NoMatches
    }
}

/// Builds the view a query asks for from a full, recency-ordered list.
#[must_use]
pub fn build_view<D: Counterparty>(
    records: Vec<TransactionRecord<D>>,
    query: &ListQuery,
) -> TransactionView<D> {
    let navigation = DateNavigation::around(&records, query.date);

    let filtered: Vec<_> = records
        .into_iter()
        .filter(|record| query.date.is_none_or(|day| record.calendar_date() == Some(day)))
        .filter(|record| {
            query
                .counterparty
                .as_deref()
                .is_none_or(|name| record.details.counterparty() == name)
        })
        .collect();

    let state = match (query.is_filtered(), filtered.is_empty()) {
        (false, _) => FilterState::Unset,
        (true, true) => FilterState::NoMatches,
        (true, false) => FilterState::Matched,
    };
    let summary = Summary::of(&filtered);

    TransactionView {
        page: PageResponse::paginate(filtered, query.page_request()),
        summary,
        navigation,
        state,
    }
}
