//! The aggregation engine: derived views over the ledger.
//!
//! Every function here reads the current record set through
//! [LedgerStore::list] and recomputes its result. No aggregate is cached or
//! maintained incrementally, so results can never drift from the stored
//! records. The cost is a full scan per call, which is fine for a personal
//! ledger.

mod aggregation;
mod handlers;

use std::collections::HashMap;

use rust_decimal::Decimal;

pub use aggregation::{DayGroup, Totals, calculate_totals, group_by_category, group_by_day};
pub use handlers::{
    CategoryStatsQuery, get_category_stats_endpoint, get_daily_stats_endpoint, get_stats_endpoint,
};

use crate::{Error, stores::LedgerStore, transaction::TransactionType};

/// Sum income and expenses over every stored transaction.
///
/// # Errors
/// Returns an [Error::Storage] if the store cannot be read, or an
/// [Error::AmountOverflow] if a sum is too large to represent.
pub fn totals(store: &impl LedgerStore) -> Result<Totals, Error> {
    calculate_totals(&store.list()?)
}

/// Sum the amounts of stored transactions of `transaction_type` per category.
///
/// # Errors
/// Returns an [Error::Storage] if the store cannot be read, or an
/// [Error::AmountOverflow] if a sum is too large to represent.
pub fn category_breakdown(
    store: &impl LedgerStore,
    transaction_type: TransactionType,
) -> Result<HashMap<String, Decimal>, Error> {
    group_by_category(&store.list()?, transaction_type)
}

/// Group stored transactions by date, newest date first.
///
/// # Errors
/// Returns an [Error::Storage] if the store cannot be read, or an
/// [Error::AmountOverflow] if a sum is too large to represent.
pub fn daily_breakdown(store: &impl LedgerStore) -> Result<Vec<DayGroup>, Error> {
    group_by_day(store.list()?)
}
