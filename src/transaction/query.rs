//! Database query helpers for reading transactions.

use rusqlite::Connection;
use time::Month;

use crate::Error;

use super::{
    Transaction, TransactionFilter,
    core::{TRANSACTION_COLUMNS, map_transaction_row},
};

/// Get the transactions sold in `month` (in any year), or every transaction if
/// `month` is `None`.
///
/// Transactions are returned in the order they were stored. The rows are read
/// with a single statement so the result is a consistent snapshot.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
fn get_transactions_in_month(
    month: Option<Month>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    match month {
        Some(month) => connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction \
                 WHERE sale_month = ?1 ORDER BY rowid ASC"
            ))?
            .query_map([month as u8], map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect(),
        None => connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction ORDER BY rowid ASC"
            ))?
            .query_map([], map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect(),
    }
}

/// Get the transactions that match `filter`, in the order they were stored.
///
/// The month part of the filter is applied by the database, the search part
/// is applied to the rows the database returns.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn get_filtered_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut transactions = get_transactions_in_month(filter.month(), connection)?;
    transactions.retain(|transaction| filter.matches(transaction));

    Ok(transactions)
}
