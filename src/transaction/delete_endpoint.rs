//! Defines the endpoint for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    stores::LedgerStore,
    transaction::{TransactionId, ValidationError},
};

/// A route handler for deleting a transaction.
///
/// Deleting a transaction that does not exist is reported as success, the
/// same as deleting one that does. A non-integer ID is a `400 Bad Request`.
pub async fn delete_transaction_endpoint<S>(
    State(mut state): State<AppState<S>>,
    path: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<Value>, Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    let Path(transaction_id) =
        path.map_err(|rejection| ValidationError::InvalidId(rejection.body_text()))?;

    state.ledger_store.delete(transaction_id)?;

    Ok(Json(json!({ "success": true })))
}
