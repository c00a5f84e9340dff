//! Summary statistics for the sales in a month.

use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_filtered_transactions},
};

/// Totals for the transactions in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of every transaction.
    pub total_sales_amount: f64,
    /// The number of transactions, whether or not they were sold.
    ///
    /// This counts every transaction in the month rather than only those with
    /// `sold == true`. Clients of the API rely on this number as is.
    pub total_sold_items: u64,
    /// The number of transactions that were not sold.
    pub total_not_sold_items: u64,
}

/// Calculate the [Statistics] for `transactions`.
pub fn calculate_statistics(transactions: &[Transaction]) -> Statistics {
    let total_sales_amount = transactions
        .iter()
        .map(|transaction| transaction.price)
        .sum();
    let total_not_sold_items = transactions
        .iter()
        .filter(|transaction| !transaction.sold)
        .count() as u64;

    Statistics {
        total_sales_amount,
        total_sold_items: transactions.len() as u64,
        total_not_sold_items,
    }
}

/// Get the [Statistics] for the transactions sold in `month` of any year.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read.
pub fn get_statistics(month: Month, connection: &Connection) -> Result<Statistics, Error> {
    let filter = TransactionFilter::all().with_month(Some(month));
    let transactions = get_filtered_transactions(&filter, connection)?;

    Ok(calculate_statistics(&transactions))
}
