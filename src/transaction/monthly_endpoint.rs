//! Defines the route handler for the transactions sold in a month.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{Error, db::with_connection, month::parse_month};

use super::{Transaction, TransactionFilter, TransactionsState, query::get_filtered_transactions};

/// Get the transactions sold in the month named in the path, e.g. `/api/products/month/March`.
///
/// Transactions from every year are included, in the order they were stored.
pub async fn get_monthly_transactions_endpoint(
    State(state): State<TransactionsState>,
    Path(month): Path<String>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let month = parse_month(&month)?;
    let filter = TransactionFilter::all().with_month(Some(month));

    with_connection(state.db_connection(), move |connection| {
        get_filtered_transactions(&filter, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not get transactions for {month}: {error}"))
    .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::extract::{FromRef, Path, State};
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        AppState, Error, PaginationConfig,
        transaction::{Transaction, TransactionsState, create_transaction},
    };

    use super::get_monthly_transactions_endpoint;

    fn get_test_state() -> TransactionsState {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
        )
        .unwrap();

        TransactionsState::from_ref(&state)
    }

    #[tokio::test]
    async fn endpoint_gets_transactions_for_month_in_any_year() {
        let state = get_test_state();
        {
            let conn = state.db_connection();
            let conn = conn.lock().unwrap();
            for (id, date) in [
                (1, datetime!(2020-07-04 00:00 UTC)),
                (2, datetime!(2021-08-04 00:00 UTC)),
                (3, datetime!(2022-07-31 00:00 UTC)),
            ] {
                create_transaction(Transaction::build(id, "", 1.0, date), &conn).unwrap();
            }
        }

        let got = get_monthly_transactions_endpoint(State(state), Path("July".to_owned()))
            .await
            .unwrap();

        let got_ids: Vec<i64> = got.iter().map(|transaction| transaction.id).collect();
        assert_eq!(got_ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn endpoint_rejects_invalid_month() {
        let result =
            get_monthly_transactions_endpoint(State(get_test_state()), Path("smarch".to_owned()))
                .await;

        assert_eq!(result.err(), Some(Error::InvalidMonth("smarch".to_owned())));
    }

    #[tokio::test]
    async fn endpoint_returns_empty_list_for_month_without_sales() {
        let got =
            get_monthly_transactions_endpoint(State(get_test_state()), Path("May".to_owned()))
                .await
                .unwrap();

        assert!(got.is_empty());
    }
}
