//! Implements a struct that holds the state of the REST server.

use crate::stores::LedgerStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The store for the ledger's transactions.
    pub ledger_store: S,
}

impl<S> AppState<S>
where
    S: LedgerStore + Clone + Send + Sync,
{
    /// Create a new [AppState] around `ledger_store`.
    pub fn new(ledger_store: S) -> Self {
        Self { ledger_store }
    }
}
