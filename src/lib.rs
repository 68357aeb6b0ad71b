//! Pocket Ledger is a personal finance ledger.
//!
//! It records income and expense events in a SQLite database and derives the
//! running aggregates (totals, per-category sums and per-day groupings) that a
//! presentation layer displays. This library provides the ledger store, the
//! aggregation engine and a JSON API over both.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
pub mod endpoints;
mod logging;
mod routing;
pub mod stats;
pub mod stores;
pub mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::transaction::ValidationError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not install the Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The caller supplied missing or malformed input.
    ///
    /// Nothing is written to the store when this error is returned.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A sum of stored amounts is too large to represent.
    ///
    /// Each stored amount is valid on its own, so this is reported as a
    /// server fault rather than a validation error.
    #[error("the stored amounts add up to more than can be represented")]
    AmountOverflow,

    /// The underlying storage failed or returned data that could not be read.
    ///
    /// A write that fails with this error has not been persisted. Callers may
    /// retry with backoff.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Faults in the durable storage layer.
///
/// The details should only be logged on the server. Clients receive a generic
/// internal server error instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StorageError {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock because another thread panicked
    /// while holding it.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A stored row could not be converted back into a transaction.
    #[error("a stored transaction could not be read: {0}")]
    CorruptRecord(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            rusqlite::Error::FromSqlConversionFailure(column, _, ref cause) => {
                tracing::error!("could not decode column {column} of a stored row: {cause}");
                StorageError::CorruptRecord(value.to_string()).into()
            }
            rusqlite::Error::InvalidColumnType(..) => {
                tracing::error!("a stored row has an unexpected column type: {value}");
                StorageError::CorruptRecord(value.to_string()).into()
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                StorageError::SqlError(error).into()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Validation failures are the caller's fault, not a system fault.
            Error::Validation(error) => {
                tracing::debug!("Rejected invalid input: {error}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": error.to_string() })),
                )
                    .into_response()
            }
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": Error::NotFound.to_string() })),
            )
                .into_response(),
            Error::AmountOverflow => {
                tracing::error!("Could not aggregate the ledger: {}", Error::AmountOverflow);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": Error::AmountOverflow.to_string() })),
                )
                    .into_response()
            }
            Error::Storage(error) => {
                tracing::error!("A storage error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response()
            }
        }
    }
}
