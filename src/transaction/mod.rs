//! Transaction management for the ledger.
//!
//! This module contains everything related to individual transactions:
//! - The `Transaction` model and the `NewTransaction` it is created from
//! - The validation step that turns raw client input into a `NewTransaction`
//! - Route handlers for creating, listing, fetching and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod list_endpoint;

pub use self::core::{NewTransaction, Transaction, TransactionId, TransactionType};
pub use create_endpoint::{CreatedTransaction, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use form::{TransactionForm, ValidationError};
pub use list_endpoint::{get_transaction_endpoint, list_transactions_endpoint};
