//! Monthly sales reports.
//!
//! Every report looks at the transactions sold in one calendar month, in any year:
//! - summary statistics (total sales amount and item counts)
//! - a price histogram with fixed price buckets
//! - the number of transactions in each category
//! - a combined report with all of the above

mod bar_chart;
mod combined;
mod handlers;
mod pie_chart;
mod statistics;

pub use bar_chart::{BarChartEntry, PRICE_BOUNDARIES, PriceBucket, bucket_prices, get_bar_chart};
pub use combined::{CombinedReport, build_combined_report, combine_reports};
pub use handlers::{
    get_bar_chart_endpoint, get_combined_report_endpoint, get_pie_chart_endpoint,
    get_statistics_endpoint,
};
pub use pie_chart::{CategoryCount, count_categories, get_pie_chart};
pub use statistics::{Statistics, calculate_statistics, get_statistics};
