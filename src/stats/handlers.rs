//! HTTP handlers for the aggregation engine.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    stats::{DayGroup, Totals, category_breakdown, daily_breakdown, totals},
    stores::LedgerStore,
    transaction::TransactionType,
};

/// The query parameters for the category breakdown.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryStatsQuery {
    /// "income" or "expense". Defaults to "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// A route handler for the total income and total expenses.
pub async fn get_stats_endpoint<S>(State(state): State<AppState<S>>) -> Result<Json<Totals>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    totals(&state.ledger_store).map(Json)
}

/// A route handler for the per-category sums of one transaction type.
pub async fn get_category_stats_endpoint<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<CategoryStatsQuery>,
) -> Result<Json<HashMap<String, Decimal>>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    let transaction_type = match query.transaction_type.as_deref() {
        None | Some("") => TransactionType::Expense,
        Some(text) => text.parse::<TransactionType>()?,
    };

    category_breakdown(&state.ledger_store, transaction_type).map(Json)
}

/// A route handler for transactions grouped by day, newest day first.
pub async fn get_daily_stats_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<DayGroup>>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    daily_breakdown(&state.ledger_store).map(Json)
}
