//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how to split transactions into pages.
    pub pagination_config: PaginationConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Where to download seed data from when re-seeding the transactions.
    pub seed_url: Option<String>,

    /// The client used to download seed data.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, pagination_config: PaginationConfig) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
            seed_url: None,
            http_client: reqwest::Client::new(),
        })
    }

    /// Set the URL that seed data is downloaded from.
    pub fn with_seed_url(mut self, seed_url: Option<String>) -> Self {
        self.seed_url = seed_url;
        self
    }
}
