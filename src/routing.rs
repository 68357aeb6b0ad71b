//! Application router configuration.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error, endpoints,
    logging::logging_middleware,
    stats::{get_category_stats_endpoint, get_daily_stats_endpoint, get_stats_endpoint},
    stores::LedgerStore,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: LedgerStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint::<S>).post(create_transaction_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<S>).delete(delete_transaction_endpoint::<S>),
        )
        .route(endpoints::STATS, get(get_stats_endpoint::<S>))
        .route(endpoints::CATEGORY_STATS, get(get_category_stats_endpoint::<S>))
        .route(endpoints::DAILY_STATS, get(get_daily_stats_endpoint::<S>))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
