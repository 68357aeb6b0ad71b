//! Implements a SQLite backed ledger store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error, StorageError,
    db::{CreateTable, MapRow},
    stores::LedgerStore,
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Stores transactions in a SQLite database.
///
/// Clones share the same connection. Every operation holds the connection
/// lock for its whole duration, so mutations are serialised and reads never
/// observe a half-applied write.
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The database must have been set up with [initialize_db](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .map_err(|_| StorageError::DatabaseLockError.into())
    }
}

impl LedgerStore for SQLiteLedgerStore {
    /// Insert a transaction into the database.
    ///
    /// # Errors
    /// This function will return a [Error::Storage] if the row could not be written.
    fn append(&mut self, transaction: NewTransaction) -> Result<TransactionId, Error> {
        let connection = self.lock()?;
        // Taken under the lock so creation times follow id order.
        let created_at = OffsetDateTime::now_utc();

        let id: TransactionId = connection
            .prepare(
                "INSERT INTO \"transaction\" (amount, type, category, description, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING id",
            )?
            .query_row(
                (
                    transaction.amount().to_string(),
                    transaction.transaction_type(),
                    transaction.category(),
                    transaction.description(),
                    transaction.date(),
                    created_at,
                ),
                |row| row.get(0),
            )?;

        tracing::debug!(
            "Appended {} transaction {id} of {} on {}",
            transaction.transaction_type(),
            transaction.amount(),
            transaction.date()
        );

        Ok(id)
    }

    /// Retrieve every transaction in the database.
    ///
    /// Ties on date and creation time are broken by ID so the order is always
    /// the same for the same data.
    ///
    /// # Errors
    /// This function will return a [Error::Storage] if there is an SQL error
    /// or a stored row cannot be read.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(
            "SELECT id, amount, type, category, description, date, created_at
             FROM \"transaction\"
             ORDER BY date DESC, created_at DESC, id DESC",
        )?;

        let transactions = statement
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::Storage] if there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self.lock()?.query_row(
            "SELECT id, amount, type, category, description, date, created_at
             FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
            Self::map_row,
        )?;

        Ok(transaction)
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a [Error::Storage] if there is an SQL error.
    fn delete(&mut self, id: TransactionId) -> Result<bool, Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            tracing::debug!("Tried to delete transaction {id}, but it does not exist");
        } else {
            tracing::debug!("Deleted transaction {id}");
        }

        Ok(rows_affected > 0)
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::Storage] if there is some SQL error.
    fn count(&self) -> Result<usize, Error> {
        let count = self
            .lock()?
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })?;

        Ok(count)
    }
}

impl CreateTable for SQLiteLedgerStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // Amounts are stored as decimal text so they round-trip exactly.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount TEXT NOT NULL CHECK (CAST(amount AS REAL) > 0),
                    type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                    category TEXT NOT NULL CHECK (category <> ''),
                    description TEXT NOT NULL DEFAULT '',
                    date TEXT NOT NULL,
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_date_created_at
             ON \"transaction\"(date DESC, created_at DESC);",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteLedgerStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount_text: String = row.get(offset + 1)?;
        let amount = Decimal::from_str(&amount_text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 1, Type::Text, Box::new(error))
        })?;
        let transaction_type = row.get(offset + 2)?;
        let category = row.get(offset + 3)?;
        let description = row.get(offset + 4)?;
        let date = row.get(offset + 5)?;
        let created_at = row.get(offset + 6)?;

        Ok(Transaction {
            id,
            amount,
            transaction_type,
            category,
            description,
            date,
            created_at,
        })
    }
}
