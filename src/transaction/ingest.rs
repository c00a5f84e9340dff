//! Loads seed data and replaces the stored transactions with it.

use std::{fs, path::Path};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

use super::{TransactionBuilder, core::create_transaction};

/// Parse seed data, a JSON array of sale records.
///
/// # Errors
/// Returns [Error::InvalidSeedData] if `json` is not a list of sale records.
pub fn parse_seed_data(json: &str) -> Result<Vec<TransactionBuilder>, Error> {
    serde_json::from_str(json).map_err(|error| Error::InvalidSeedData(error.to_string()))
}

/// Read and parse the seed data in the JSON file at `path`.
///
/// # Errors
/// Returns [Error::SeedFileError] if the file cannot be read, or
/// [Error::InvalidSeedData] if it does not contain a list of sale records.
pub fn load_seed_file(path: &Path) -> Result<Vec<TransactionBuilder>, Error> {
    let json = fs::read_to_string(path).map_err(|error| {
        tracing::error!("could not read seed file {}: {error}", path.display());
        Error::SeedFileError(format!("{}: {error}", path.display()))
    })?;

    parse_seed_data(&json)
}

/// Download and parse the seed data served at `url`.
///
/// # Errors
/// Returns [Error::SeedFetchError] if the request fails or the server does not
/// respond with a success status, or [Error::InvalidSeedData] if the response
/// is not a list of sale records.
pub async fn fetch_seed_data(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<TransactionBuilder>, Error> {
    let json = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::SeedFetchError(error.to_string()))?
        .text()
        .await
        .map_err(|error| Error::SeedFetchError(error.to_string()))?;

    parse_seed_data(&json)
}

/// Delete every stored transaction and insert `builders` in their place.
///
/// The delete and inserts happen in one SQL transaction, so readers either see
/// the old set of transactions or the new set, never a mix. Nothing is changed
/// if any of the new transactions is rejected.
///
/// Returns the number of transactions stored.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativePrice] if any transaction has a negative price,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn replace_all_transactions(
    builders: Vec<TransactionBuilder>,
    connection: &Connection,
) -> Result<usize, Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let deleted = transaction.execute("DELETE FROM sale_transaction", ())?;

    let count = builders.len();
    for builder in builders {
        create_transaction(builder, &transaction)?;
    }

    transaction.commit()?;

    tracing::info!("replaced {deleted} transactions with {count} new transactions");

    Ok(count)
}
