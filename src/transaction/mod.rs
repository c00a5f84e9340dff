//! Sale transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionFilter` for selecting transactions by search text and month
//! - Database functions for storing, querying and replacing transactions
//! - Handlers for listing transactions and re-seeding them from a URL

mod core;
mod filter;
mod ingest;
mod initialize_endpoint;
mod list_endpoint;
mod monthly_endpoint;
mod query;

pub use core::{
    Transaction, TransactionBuilder, UNCATEGORIZED, count_transactions, create_transaction_table,
};
pub use filter::TransactionFilter;
pub use ingest::{fetch_seed_data, load_seed_file, parse_seed_data, replace_all_transactions};
pub use initialize_endpoint::initialize_endpoint;
pub use list_endpoint::{
    TransactionsState, get_all_transactions_endpoint, list_transactions,
    list_transactions_endpoint,
};
pub use monthly_endpoint::get_monthly_transactions_endpoint;

pub(crate) use query::get_filtered_transactions;

#[cfg(test)]
pub use core::create_transaction;
