//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    AppState, Error,
    stores::LedgerStore,
    transaction::{Transaction, TransactionId, ValidationError},
};

/// A route handler for listing every transaction, newest first.
pub async fn list_transactions_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    state.ledger_store.list().map(Json)
}

/// A route handler for getting a transaction by its ID.
///
/// Responds with `404 Not Found` if there is no such transaction, or
/// `400 Bad Request` if the ID is not an integer.
pub async fn get_transaction_endpoint<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Transaction>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    let Path(transaction_id) =
        path.map_err(|rejection| ValidationError::InvalidId(rejection.body_text()))?;

    state.ledger_store.get(transaction_id).map(Json)
}
