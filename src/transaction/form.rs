//! The validation step between raw client input and the ledger store.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, macros::format_description};

use crate::transaction::{NewTransaction, TransactionType};

/// The reasons a new transaction can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent, null or blank.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The amount could not be read as a decimal number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount was zero or negative. Use the transaction type to record
    /// money going out instead of a negative amount.
    #[error("the amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The transaction type was not "income" or "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidType(String),

    /// The date was not a real calendar date in the form YYYY-MM-DD.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The transaction ID in the request path was not an integer.
    #[error("invalid transaction ID: {0}")]
    InvalidId(String),

    /// The request body could not be parsed at all.
    #[error("could not parse the request body: {0}")]
    MalformedBody(String),
}

/// Raw input for creating a transaction.
///
/// Every field is optional so that a missing field is reported as a
/// [ValidationError] rather than a deserialization failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// A positive number, or a string containing one.
    pub amount: Option<Value>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// A non-empty category name.
    pub category: Option<String>,
    /// Optional text detailing the transaction.
    pub description: Option<String>,
    /// The event date as YYYY-MM-DD.
    pub date: Option<String>,
}

impl TransactionForm {
    /// Check every field and produce a transaction that is ready to be stored.
    ///
    /// # Errors
    ///
    /// Returns the first [ValidationError] found, checking the amount, type,
    /// category and date in that order.
    pub fn validate(self) -> Result<NewTransaction, ValidationError> {
        let amount = parse_amount(self.amount.as_ref())?;
        let transaction_type: TransactionType =
            required(self.transaction_type.as_deref(), "type")?.parse()?;
        let category = required(self.category.as_deref(), "category")?;
        let date = parse_date(required(self.date.as_deref(), "date")?)?;
        let description = self.description.unwrap_or_default();

        NewTransaction::new(amount, transaction_type, category, &description, date)
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn parse_amount(value: Option<&Value>) -> Result<Decimal, ValidationError> {
    let text = match value {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("amount")),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) if text.trim().is_empty() => {
            return Err(ValidationError::MissingField("amount"));
        }
        Some(Value::String(text)) => text.trim().to_owned(),
        Some(other) => return Err(ValidationError::InvalidAmount(other.to_string())),
    };

    // JSON numbers such as 1e3 use scientific notation.
    let parsed = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text));

    parsed.map_err(|_| ValidationError::InvalidAmount(text))
}

fn parse_date(text: &str) -> Result<Date, ValidationError> {
    let invalid = || ValidationError::InvalidDate(text.to_owned());

    // `[year]` alone also accepts signed and longer years such as "+2024" or "-0001".
    let has_plain_year = text.len() == 10 && text.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    if !has_plain_year {
        return Err(invalid());
    }

    let date = Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| invalid())?;

    if date.year() < 1 {
        return Err(invalid());
    }

    Ok(date)
}
