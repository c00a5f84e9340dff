//! Sets up the application's SQLite database and runs work against it.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use tokio::task;

use crate::{Error, transaction::create_transaction_table};

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Run `operation` against the database on the blocking thread pool.
///
/// The connection lock is only ever taken inside the blocking task, so a slow
/// query or a held lock never stalls the async executor.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned,
/// [Error::BlockingTaskFailed] if the task panicked or was cancelled, or the
/// error returned by `operation`.
pub(crate) async fn with_connection<T, F>(
    db_connection: Arc<Mutex<Connection>>,
    operation: F,
) -> Result<T, Error>
where
    F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(move || {
        let connection = db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        operation(&connection)
    })
    .await
    .inspect_err(|error| tracing::error!("database task failed: {error}"))
    .map_err(|error| Error::BlockingTaskFailed(error.to_string()))?
}
