//! Route handlers for the monthly reports.
//!
//! Each handler checks the month before touching the database, then builds the
//! report from a single read on the blocking thread pool.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, db::with_connection, month::parse_required_month};

use super::{
    bar_chart::{BarChartEntry, get_bar_chart},
    combined::{CombinedReport, build_combined_report},
    pie_chart::{CategoryCount, get_pie_chart},
    statistics::{Statistics, get_statistics},
};

/// The state needed for the report handlers.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a monthly report.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// The month to report on, e.g. "March".
    pub month: Option<String>,
}

/// Get the sales totals for a month.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Statistics>, Error> {
    let month = parse_required_month(query.month.as_deref())?;

    with_connection(state.db_connection, move |connection| get_statistics(month, connection))
        .await
        .inspect_err(|error| tracing::error!("could not get statistics for {month}: {error}"))
        .map(Json)
}

/// Get the price histogram for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<BarChartEntry>>, Error> {
    let month = parse_required_month(query.month.as_deref())?;

    with_connection(state.db_connection, move |connection| get_bar_chart(month, connection))
        .await
        .inspect_err(|error| tracing::error!("could not get bar chart for {month}: {error}"))
        .map(Json)
}

/// Get the category distribution for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let month = parse_required_month(query.month.as_deref())?;

    with_connection(state.db_connection, move |connection| get_pie_chart(month, connection))
        .await
        .inspect_err(|error| tracing::error!("could not get pie chart for {month}: {error}"))
        .map(Json)
}

/// Get the statistics, price histogram and category distribution for a month.
pub async fn get_combined_report_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CombinedReport>, Error> {
    let month = parse_required_month(query.month.as_deref())?;

    with_connection(state.db_connection, move |connection| {
        build_combined_report(month, connection)
    })
    .await
    .inspect_err(|error| tracing::error!("could not build combined report for {month}: {error}"))
    .map(Json)
}
