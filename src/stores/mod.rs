//! Contains the [LedgerStore] trait and its implementations.

mod transaction;

pub mod sqlite;

pub use transaction::LedgerStore;
