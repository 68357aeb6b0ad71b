/*! This module defines the traits shared by the SQLite-backed stores and sets up the ledger database. */

use rusqlite::{Connection, Error, Row};

use crate::stores::sqlite::SQLiteLedgerStore;

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// Implementations must be idempotent so that opening an existing database is not an error.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type produced from a row.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading columns starting at `offset`.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, Error>;
}

/// Configure `connection` and create the ledger tables if they do not exist.
///
/// File databases are switched to write-ahead logging with full syncing, so a
/// write is on disk by the time the statement that made it returns.
///
/// # Errors
/// Returns an error if a pragma cannot be set or a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // In-memory databases report "memory" and keep it.
    let journal_mode: String =
        connection.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    tracing::debug!("SQLite journal mode: {journal_mode}");

    connection.execute_batch("PRAGMA synchronous = FULL;")?;

    SQLiteLedgerStore::create_table(connection)?;

    Ok(())
}
