//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    stores::LedgerStore,
    transaction::{TransactionForm, TransactionId, ValidationError},
};

/// The response body for a newly created transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTransaction {
    /// The ID the store assigned to the transaction.
    pub id: TransactionId,
}

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created` and the new ID on success, or `400 Bad Request`
/// if the body is missing a field or has an invalid one.
pub async fn create_transaction_endpoint<S>(
    State(mut state): State<AppState<S>>,
    payload: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedTransaction>), Error>
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    let Json(form) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    let new_transaction = form.validate()?;
    let id = state.ledger_store.append(new_transaction)?;

    Ok((StatusCode::CREATED, Json(CreatedTransaction { id })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        build_router, endpoints,
        stores::{
            LedgerStore,
            sqlite::{SQLAppState, create_app_state},
        },
        transaction::{CreatedTransaction, TransactionType},
    };

    fn get_test_state_and_server() -> (SQLAppState, TestServer) {
        let state = create_app_state(Connection::open_in_memory().unwrap())
            .expect("Could not create app state");
        let server =
            TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

        (state, server)
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, server) = get_test_state_and_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 50,
                "type": "expense",
                "category": "餐饮",
                "description": "lunch",
                "date": "2024-01-01"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let CreatedTransaction { id } = response.json::<CreatedTransaction>();
        let transaction = state.ledger_store.get(id).expect("transaction should exist");
        assert_eq!(transaction.amount, Decimal::new(50, 0));
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.category, "餐饮");
        assert_eq!(transaction.description, "lunch");
        assert_eq!(transaction.date, date!(2024 - 01 - 01));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_without_writing() {
        let (state, server) = get_test_state_and_server();
        let cases = [
            json!({"amount": 0, "type": "expense", "category": "Food", "date": "2024-01-01"}),
            json!({"amount": -10, "type": "expense", "category": "Food", "date": "2024-01-01"}),
            json!({"type": "expense", "category": "Food", "date": "2024-01-01"}),
            json!({"amount": 10, "category": "Food", "date": "2024-01-01"}),
            json!({"amount": 10, "type": "refund", "category": "Food", "date": "2024-01-01"}),
            json!({"amount": 10, "type": "income", "date": "2024-01-01"}),
            json!({"amount": 10, "type": "income", "category": "Salary"}),
            json!({"amount": 10, "type": "income", "category": "Salary", "date": "2024-13-01"}),
            json!({"amount": 10, "type": "income", "category": "Salary", "date": "+2024-01-01"}),
            json!({"amount": 10, "type": "income", "category": "Salary", "date": "-0001-01-01"}),
            json!({"amount": 10, "type": "income", "category": "Salary", "date": "0000-01-01"}),
        ];

        for body in cases {
            let response = server.post(endpoints::TRANSACTIONS).json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(
                response.json::<Value>()["error"].is_string(),
                "body {body} should produce an error message"
            );
        }

        assert_eq!(state.ledger_store.count(), Ok(0));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (state, server) = get_test_state_and_server();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"amount": 10, "type": "income", "category": 5, "date": "2024-01-01"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(state.ledger_store.count(), Ok(0));
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let (_, server) = get_test_state_and_server();
        let body =
            json!({"amount": "9.99", "type": "expense", "category": "Books", "date": "2024-02-29"});

        let first = server
            .post(endpoints::TRANSACTIONS)
            .json(&body)
            .await
            .json::<CreatedTransaction>();
        let second = server
            .post(endpoints::TRANSACTIONS)
            .json(&body)
            .await
            .json::<CreatedTransaction>();

        assert!(second.id > first.id);
    }
}
