//! Combines the statistics, price histogram and category distribution for a month.

use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_filtered_transactions},
};

use super::{
    bar_chart::{BarChartEntry, bucket_prices},
    pie_chart::{CategoryCount, count_categories},
    statistics::{Statistics, calculate_statistics},
};

/// Every report for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// Totals for the month.
    pub statistics: Statistics,
    /// The number of transactions in each price bucket.
    pub bar_chart: Vec<BarChartEntry>,
    /// The number of transactions in each category.
    pub pie_chart: Vec<CategoryCount>,
}

/// Build every report from the same `transactions`.
pub fn combine_reports(transactions: &[Transaction]) -> CombinedReport {
    CombinedReport {
        statistics: calculate_statistics(transactions),
        bar_chart: bucket_prices(transactions),
        pie_chart: count_categories(transactions),
    }
}

/// Build every report for the transactions sold in `month` of any year.
///
/// The transactions are read once and shared by all three reports, so they
/// always describe the same data even if the transactions are replaced
/// while the report is built.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read. No partial
/// report is returned.
pub fn build_combined_report(month: Month, connection: &Connection) -> Result<CombinedReport, Error> {
    let filter = TransactionFilter::all().with_month(Some(month));
    let transactions = get_filtered_transactions(&filter, connection)?;

    Ok(combine_reports(&transactions))
}
