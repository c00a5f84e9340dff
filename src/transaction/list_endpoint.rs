//! Defines the route handlers that list transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    db::with_connection,
    pagination::{Page, PageQuery, PaginationConfig, paginate},
};

use super::{
    Transaction, TransactionFilter,
    query::get_filtered_transactions,
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The defaults for paging through transactions.
    pagination_config: PaginationConfig,
}

impl TransactionsState {
    /// The database connection for reading transactions.
    pub(crate) fn db_connection(&self) -> Arc<Mutex<Connection>> {
        self.db_connection.clone()
    }
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Text to look for in the title or description, or a price.
    pub search: Option<String>,
    /// Only list transactions sold in this month, e.g. "March".
    pub month: Option<String>,
    /// The page number, starting from one.
    pub page: Option<String>,
    /// The number of transactions per page.
    pub per_page: Option<String>,
}

/// Get page number `page` of the transactions that match `filter`.
///
/// Transactions are listed in the order they were stored.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read.
pub fn list_transactions(
    filter: &TransactionFilter,
    page: u64,
    per_page: u64,
    connection: &Connection,
) -> Result<Page<Transaction>, Error> {
    let transactions = get_filtered_transactions(filter, connection)?;

    Ok(paginate(transactions, page, per_page))
}

/// Search transactions by text and month, one page at a time.
///
/// The month is checked before the database is touched, and the search runs on
/// the blocking thread pool.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionsState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Page<Transaction>>, Error> {
    let filter = TransactionFilter::new(query.search.as_deref(), query.month.as_deref())?;
    let (page, per_page) = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .resolve(&state.pagination_config);

    with_connection(state.db_connection, move |connection| {
        list_transactions(&filter, page, per_page, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not list transactions: {error}"))
    .map(Json)
}

/// Get every transaction, in the order they were stored.
pub async fn get_all_transactions_endpoint(
    State(state): State<TransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    with_connection(state.db_connection, |connection| {
        get_filtered_transactions(&TransactionFilter::all(), connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not get transactions: {error}"))
    .map(Json)
}
