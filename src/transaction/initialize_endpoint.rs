//! Defines the route handler that replaces the stored transactions with seed data
//! downloaded from a URL.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, Error, db::with_connection};

use super::ingest::{fetch_seed_data, replace_all_transactions};

/// The state needed for re-seeding the transactions.
#[derive(Debug, Clone)]
pub struct SeedState {
    db_connection: Arc<Mutex<Connection>>,
    seed_url: Option<String>,
    http_client: reqwest::Client,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            seed_url: state.seed_url.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

/// Download the seed data and replace every stored transaction with it.
///
/// The download finishes before the database is touched, and the replacement
/// happens in one SQL transaction, so concurrent readers see either the old
/// or the new transactions.
pub async fn initialize_endpoint(State(state): State<SeedState>) -> Result<Json<Value>, Error> {
    let url = state.seed_url.ok_or(Error::SeedUrlNotConfigured)?;

    let builders = fetch_seed_data(&state.http_client, &url)
        .await
        .inspect_err(|error| tracing::error!("could not fetch seed data from {url}: {error}"))?;

    let count = with_connection(state.db_connection, move |connection| {
        replace_all_transactions(builders, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not store seed data: {error}"))?;

    Ok(Json(json!({
        "message": "Database initialized with seed data",
        "count": count,
    })))
}
