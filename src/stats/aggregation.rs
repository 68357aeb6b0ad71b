//! Pure aggregation over a slice of transactions.
//!
//! Nothing here touches the store. Callers pass in the current record set and
//! every function recomputes its result from scratch.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::{Transaction, TransactionType},
};

/// The sum of all income and the sum of all expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// The sum of the amounts of all income transactions.
    pub total_income: Decimal,
    /// The sum of the amounts of all expense transactions.
    pub total_expense: Decimal,
}

impl Totals {
    /// Income minus expenses. Zero for an empty ledger.
    ///
    /// Both totals are non-negative and in range, so the difference cannot overflow.
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// The transactions that happened on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    /// The date shared by every transaction in the group.
    pub date: Date,
    /// The transactions on `date`, in the order they were given.
    pub transactions: Vec<Transaction>,
    /// The sum of the expense amounts on `date`. Income is not included.
    pub expense_total: Decimal,
}

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total.checked_add(amount).ok_or(Error::AmountOverflow)
}

/// Sums income and expenses separately.
///
/// # Errors
/// Returns [Error::AmountOverflow] if either sum is too large to represent.
pub fn calculate_totals(transactions: &[Transaction]) -> Result<Totals, Error> {
    let mut totals = Totals::default();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => {
                totals.total_income = checked_sum(totals.total_income, transaction.amount)?;
            }
            TransactionType::Expense => {
                totals.total_expense = checked_sum(totals.total_expense, transaction.amount)?;
            }
        }
    }

    Ok(totals)
}

/// Sums the amounts of transactions of `transaction_type` per category.
///
/// Categories are matched exactly, so "Food" and "food" are different groups.
/// Categories without any matching transactions are absent from the result.
///
/// # Errors
/// Returns [Error::AmountOverflow] if a category's sum is too large to represent.
pub fn group_by_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Result<HashMap<String, Decimal>, Error> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == transaction_type)
    {
        let total = totals.entry(transaction.category.clone()).or_default();
        *total = checked_sum(*total, transaction.amount)?;
    }

    Ok(totals)
}

/// Groups transactions by date, newest date first.
///
/// Within a group, transactions keep the order they had in `transactions`.
///
/// # Errors
/// Returns [Error::AmountOverflow] if a day's expense total is too large to represent.
pub fn group_by_day(transactions: Vec<Transaction>) -> Result<Vec<DayGroup>, Error> {
    let mut days: BTreeMap<Date, DayGroup> = BTreeMap::new();

    for transaction in transactions {
        let day = days.entry(transaction.date).or_insert_with(|| DayGroup {
            date: transaction.date,
            transactions: Vec::new(),
            expense_total: Decimal::ZERO,
        });

        if transaction.transaction_type == TransactionType::Expense {
            day.expense_total = checked_sum(day.expense_total, transaction.amount)?;
        }

        day.transactions.push(transaction);
    }

    Ok(days.into_values().rev().collect())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        Error,
        stats::aggregation::{Totals, calculate_totals, group_by_category, group_by_day},
        transaction::{Transaction, TransactionType},
    };

    fn create_test_transaction(
        id: i64,
        amount: Decimal,
        transaction_type: TransactionType,
        category: &str,
        date: Date,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            transaction_type,
            category: category.to_owned(),
            description: String::new(),
            date,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn expense(id: i64, amount: i64, category: &str, date: Date) -> Transaction {
        create_test_transaction(
            id,
            Decimal::new(amount, 0),
            TransactionType::Expense,
            category,
            date,
        )
    }

    fn income(id: i64, amount: i64, category: &str, date: Date) -> Transaction {
        create_test_transaction(
            id,
            Decimal::new(amount, 0),
            TransactionType::Income,
            category,
            date,
        )
    }

    #[test]
    fn totals_are_zero_for_empty_ledger() {
        let totals = calculate_totals(&[]).unwrap();

        assert_eq!(totals, Totals::default());
        assert_eq!(totals.total_income, Decimal::ZERO);
        assert_eq!(totals.total_expense, Decimal::ZERO);
        assert_eq!(totals.balance(), Decimal::ZERO);
    }

    #[test]
    fn totals_sum_income_and_expenses_separately() {
        let transactions = vec![
            expense(1, 50, "餐饮", date!(2024 - 01 - 01)),
            income(2, 1000, "工资", date!(2024 - 01 - 01)),
            expense(3, 20, "交通", date!(2024 - 01 - 02)),
        ];

        let totals = calculate_totals(&transactions).unwrap();

        assert_eq!(totals.total_income, Decimal::new(1000, 0));
        assert_eq!(totals.total_expense, Decimal::new(70, 0));
        assert_eq!(totals.balance(), Decimal::new(930, 0));
    }

    #[test]
    fn totals_do_not_drift_like_floats() {
        let transactions: Vec<_> = (1..=10)
            .map(|id| {
                create_test_transaction(
                    id,
                    Decimal::new(1, 1),
                    TransactionType::Expense,
                    "Sweets",
                    date!(2024 - 01 - 01),
                )
            })
            .collect();

        let totals = calculate_totals(&transactions).unwrap();

        assert_eq!(totals.total_expense, Decimal::ONE);
        assert_eq!(totals.total_expense.to_string(), "1.0");
    }

    #[test]
    fn group_by_category_sums_each_category() {
        let transactions = vec![
            expense(1, 50, "餐饮", date!(2024 - 01 - 01)),
            expense(2, 30, "餐饮", date!(2024 - 01 - 02)),
            expense(3, 20, "交通", date!(2024 - 01 - 02)),
            income(4, 1000, "工资", date!(2024 - 01 - 01)),
        ];

        let result = group_by_category(&transactions, TransactionType::Expense).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["餐饮"], Decimal::new(80, 0));
        assert_eq!(result["交通"], Decimal::new(20, 0));
        assert!(!result.contains_key("工资"));
    }

    #[test]
    fn group_by_category_is_case_sensitive() {
        let transactions = vec![
            expense(1, 5, "Food", date!(2024 - 01 - 01)),
            expense(2, 7, "food", date!(2024 - 01 - 01)),
        ];

        let result = group_by_category(&transactions, TransactionType::Expense).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["Food"], Decimal::new(5, 0));
        assert_eq!(result["food"], Decimal::new(7, 0));
    }

    #[test]
    fn group_by_category_sums_to_total_expense() {
        let transactions = vec![
            expense(1, 12, "A", date!(2024 - 01 - 01)),
            expense(2, 3, "B", date!(2024 - 01 - 02)),
            expense(3, 8, "A", date!(2024 - 01 - 03)),
            income(4, 100, "C", date!(2024 - 01 - 03)),
        ];

        let breakdown_sum: Decimal = group_by_category(&transactions, TransactionType::Expense)
            .unwrap()
            .values()
            .sum();

        assert_eq!(breakdown_sum, calculate_totals(&transactions).unwrap().total_expense);
    }

    #[test]
    fn group_by_category_handles_empty_input() {
        let result = group_by_category(&[], TransactionType::Income).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn group_by_day_orders_dates_descending() {
        let transactions = vec![
            expense(1, 1, "A", date!(2024 - 01 - 15)),
            expense(2, 2, "A", date!(2024 - 03 - 01)),
            expense(3, 3, "A", date!(2023 - 12 - 31)),
        ];

        let dates: Vec<_> = group_by_day(transactions)
            .unwrap()
            .into_iter()
            .map(|day| day.date)
            .collect();

        assert_eq!(
            dates,
            vec![
                date!(2024 - 03 - 01),
                date!(2024 - 01 - 15),
                date!(2023 - 12 - 31)
            ]
        );
    }

    #[test]
    fn group_by_day_only_counts_expenses_in_daily_total() {
        let transactions = vec![
            income(2, 1000, "工资", date!(2024 - 01 - 01)),
            expense(1, 50, "餐饮", date!(2024 - 01 - 01)),
            expense(3, 25, "交通", date!(2024 - 01 - 02)),
        ];

        let days = group_by_day(transactions).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date!(2024 - 01 - 02));
        assert_eq!(days[0].expense_total, Decimal::new(25, 0));
        assert_eq!(days[1].date, date!(2024 - 01 - 01));
        assert_eq!(days[1].expense_total, Decimal::new(50, 0));
        let ids: Vec<_> = days[1].transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn group_by_day_income_only_day_has_zero_expense_total() {
        let days = group_by_day(vec![income(1, 10, "Gift", date!(2024 - 05 - 05))]).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].expense_total, Decimal::ZERO);
        assert_eq!(days[0].transactions.len(), 1);
    }

    #[test]
    fn group_by_day_handles_empty_input() {
        assert!(group_by_day(vec![]).unwrap().is_empty());
    }

    // Valid on its own, but two of them add up to more than Decimal::MAX.
    const HUGE_AMOUNT: i128 = 50_000_000_000_000_000_000_000_000_000;

    fn huge_income(id: i64, category: &str, date: Date) -> Transaction {
        create_test_transaction(
            id,
            Decimal::from_i128_with_scale(HUGE_AMOUNT, 0),
            TransactionType::Income,
            category,
            date,
        )
    }

    fn huge_expense(id: i64, category: &str, date: Date) -> Transaction {
        Transaction {
            transaction_type: TransactionType::Expense,
            ..huge_income(id, category, date)
        }
    }

    #[test]
    fn totals_report_overflow_instead_of_panicking() {
        let transactions = vec![
            huge_income(1, "Lottery", date!(2024 - 01 - 01)),
            huge_income(2, "Lottery", date!(2024 - 01 - 02)),
        ];

        assert_eq!(calculate_totals(&transactions), Err(Error::AmountOverflow));
    }

    #[test]
    fn totals_at_the_limit_do_not_overflow() {
        let transactions = vec![
            huge_income(1, "Lottery", date!(2024 - 01 - 01)),
            huge_expense(2, "Yacht", date!(2024 - 01 - 01)),
        ];

        let totals = calculate_totals(&transactions).unwrap();

        assert_eq!(totals.total_income, Decimal::from_i128_with_scale(HUGE_AMOUNT, 0));
        assert_eq!(totals.balance(), Decimal::ZERO);
    }

    #[test]
    fn group_by_category_reports_overflow_instead_of_panicking() {
        let transactions = vec![
            huge_expense(1, "Yacht", date!(2024 - 01 - 01)),
            huge_expense(2, "Yacht", date!(2024 - 01 - 02)),
        ];

        assert_eq!(
            group_by_category(&transactions, TransactionType::Expense),
            Err(Error::AmountOverflow)
        );
        assert!(
            group_by_category(&transactions, TransactionType::Income)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn group_by_day_reports_overflow_instead_of_panicking() {
        let transactions = vec![
            huge_expense(1, "Yacht", date!(2024 - 01 - 01)),
            huge_expense(2, "Harbour", date!(2024 - 01 - 01)),
        ];

        assert_eq!(group_by_day(transactions.clone()), Err(Error::AmountOverflow));

        let separate_days = vec![
            huge_expense(1, "Yacht", date!(2024 - 01 - 01)),
            huge_expense(2, "Harbour", date!(2024 - 01 - 02)),
        ];
        assert_eq!(group_by_day(separate_days).unwrap().len(), 2);
    }
}
