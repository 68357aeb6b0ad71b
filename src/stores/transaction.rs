//! Defines the ledger store trait.

use crate::{
    Error,
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Durable, ordered storage of transactions.
///
/// Records are only ever appended or deleted, never updated in place.
/// Implementations must serialise mutations so that concurrent appends get
/// distinct, increasing IDs, and every read must see a consistent snapshot.
pub trait LedgerStore {
    /// Persist a validated transaction and return the ID assigned to it.
    ///
    /// The store sets the record's creation time. Either the whole record is
    /// persisted and its ID returned, or nothing is persisted and an
    /// [Error::Storage] is returned.
    fn append(&mut self, transaction: NewTransaction) -> Result<TransactionId, Error>;

    /// Retrieve all transactions, newest event date first.
    ///
    /// Transactions on the same date are ordered by most recently recorded first.
    fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve a transaction by its `id`.
    ///
    /// Returns [Error::NotFound] if there is no such transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Remove the transaction with `id` if it exists.
    ///
    /// Returns whether a transaction was removed. Deleting an ID that does not
    /// exist is not an error.
    fn delete(&mut self, id: TransactionId) -> Result<bool, Error>;

    /// Get the total number of stored transactions.
    fn count(&self) -> Result<usize, Error>;
}
