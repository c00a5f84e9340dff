//! Sales Insights is a small analytics service for product sale transactions.
//!
//! This library provides a JSON API that answers month-scoped questions about
//! the recorded sales: a searchable paginated listing, summary statistics, a
//! price-range histogram, a category distribution and a combined report.
//!
//! Month filters only look at the calendar month of a sale, never the year.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod logging;
mod month;
mod pagination;
mod report;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::{month_name, parse_month};
pub use pagination::{Page, PaginationConfig, paginate};
pub use report::{
    BarChartEntry, CategoryCount, CombinedReport, PRICE_BOUNDARIES, PriceBucket, Statistics,
    bucket_prices, build_combined_report, calculate_statistics, combine_reports,
    count_categories, get_bar_chart, get_pie_chart, get_statistics,
};
pub use routing::build_router;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionFilter, UNCATEGORIZED, count_transactions,
    fetch_seed_data, list_transactions, load_seed_file, parse_seed_data,
    replace_all_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An operation that is scoped to a month was called without a month.
    #[error("Month is required!")]
    MissingMonth,

    /// The month name is not one of the twelve English month names.
    ///
    /// Month names are case-sensitive, e.g., "March" is valid but "march" is not.
    #[error("Invalid month provided! \"{0}\" is not a month")]
    InvalidMonth(String),

    /// A transaction with a negative price was given to the ingestion step.
    #[error("transaction prices cannot be negative, got {0}")]
    NegativePrice(f64),

    /// The seed data could not be parsed as a list of transactions.
    #[error("could not parse the seed data: {0}")]
    InvalidSeedData(String),

    /// The seed file could not be read.
    #[error("could not read the seed file: {0}")]
    SeedFileError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A database task on the blocking thread pool panicked or was cancelled.
    #[error("a database task failed: {0}")]
    BlockingTaskFailed(String),

    /// Re-seeding was requested but the server has no seed URL.
    #[error("no seed data URL is configured")]
    SeedUrlNotConfigured,

    /// The seed data could not be downloaded.
    #[error("could not fetch the seed data: {0}")]
    SeedFetchError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::MissingMonth
            | Error::InvalidMonth(_)
            | Error::NegativePrice(_)
            | Error::InvalidSeedData(_) => StatusCode::BAD_REQUEST,
            Error::SeedUrlNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Error::SeedFetchError(_) => StatusCode::BAD_GATEWAY,
            Error::SeedFileError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::BlockingTaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            Error::InvalidMonth(_) => "Invalid month provided!".to_owned(),
            // Any errors that are not handled above are not intended to be shown to the client.
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::SeedFileError(_)
            | Error::BlockingTaskFailed(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    use crate::Error;

    async fn response_parts(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_month_is_bad_request() {
        let (status, body) = response_parts(Error::MissingMonth).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Month is required!");
    }

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let (status, body) = response_parts(Error::InvalidMonth("smarch".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid month provided!");
    }

    #[tokio::test]
    async fn store_errors_hide_details() {
        let (status, body) = response_parts(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(body["message"], Error::DatabaseLockError.to_string());
    }

    #[tokio::test]
    async fn failed_seed_download_is_bad_gateway() {
        let (status, body) =
            response_parts(Error::SeedFetchError("connection refused".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["message"],
            "could not fetch the seed data: connection refused"
        );
    }

    #[tokio::test]
    async fn missing_seed_url_is_service_unavailable() {
        let (status, _) = response_parts(Error::SeedUrlNotConfigured).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
