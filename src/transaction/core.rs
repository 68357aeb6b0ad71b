//! Defines the core data models for ledger transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::transaction::ValidationError;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
///
/// The sign of a transaction is carried here, never in its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name used for this type in the database and in the JSON API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::InvalidType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never modified after they are stored. To create one, validate a
/// [NewTransaction] and append it to a [LedgerStore](crate::stores::LedgerStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store.
    pub id: TransactionId,
    /// The amount of money spent or earned. Always greater than zero.
    pub amount: Decimal,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-form category, e.g. "Groceries" or "Salary".
    pub category: String,
    /// A text description of what the transaction was for. May be empty.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was recorded in the ledger.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction that has passed validation and is ready to be stored.
///
/// The only ways to get one are [NewTransaction::new] and
/// [TransactionForm::validate](crate::transaction::TransactionForm::validate),
/// so a store may assume the amount is positive and the category is not blank.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: Decimal,
    transaction_type: TransactionType,
    category: String,
    description: String,
    date: Date,
}

impl NewTransaction {
    /// Create a new transaction.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [ValidationError::NonPositiveAmount] if `amount` is zero or negative,
    /// - or [ValidationError::MissingField] if `category` is empty or only whitespace.
    pub fn new(
        amount: Decimal,
        transaction_type: TransactionType,
        category: &str,
        description: &str,
        date: Date,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        if category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }

        Ok(Self {
            amount,
            transaction_type,
            category: category.to_owned(),
            description: description.to_owned(),
            date,
        })
    }

    /// The amount of money spent or earned.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Whether the money was earned or spent.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The category, exactly as supplied.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The description, possibly empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }
}

// ============================================================================
// TESTS
// ============================================================================
