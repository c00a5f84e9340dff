//! Application router configuration.

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    report::{
        get_bar_chart_endpoint, get_combined_report_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    transaction::{
        get_all_transactions_endpoint, get_monthly_transactions_endpoint, initialize_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::INITIALIZE, get(initialize_endpoint))
        .route(endpoints::PRODUCTS, get(get_all_transactions_endpoint))
        .route(
            endpoints::PRODUCTS_BY_MONTH,
            get(get_monthly_transactions_endpoint),
        )
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_REPORT, get(get_combined_report_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
