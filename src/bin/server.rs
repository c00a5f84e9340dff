use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_insights::{
    AppState, PaginationConfig, build_router, count_transactions, graceful_shutdown,
    load_seed_file, replace_all_transactions,
};

/// The JSON API server for sales insights.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// A JSON file of sale transactions that replaces the stored transactions on startup.
    #[arg(long)]
    seed_path: Option<PathBuf>,

    /// A URL serving JSON seed data, downloaded whenever `/api/initialize` is requested.
    #[arg(long)]
    seed_url: Option<String>,

    /// The number of transactions per page when a request does not ask for a page size.
    #[arg(long, default_value_t = 10)]
    page_size: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path).expect("Could not open the database.");
    let pagination_config = PaginationConfig {
        default_page_size: args.page_size.max(1),
        ..Default::default()
    };
    let app_state = AppState::new(conn, pagination_config)
        .expect("Could not initialize the database.")
        .with_seed_url(args.seed_url.clone());

    {
        let connection = app_state
            .db_connection
            .lock()
            .expect("Could not acquire the database lock.");

        if let Some(seed_path) = &args.seed_path {
            let transactions = load_seed_file(seed_path).expect("Could not load the seed file.");
            replace_all_transactions(transactions, &connection)
                .expect("Could not store the seed transactions.");
        }

        let count = count_transactions(&connection).expect("Could not count transactions.");
        tracing::info!("Serving {count} transactions from {}", args.db_path);
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
