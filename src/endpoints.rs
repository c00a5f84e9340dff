//! The API endpoints URIs.

/// The route for replacing the transactions with freshly downloaded seed data.
pub const INITIALIZE: &str = "/api/initialize";
/// The route for listing every transaction.
pub const PRODUCTS: &str = "/api/products";
/// The route for the transactions sold in a month, e.g. `/api/products/month/March`.
pub const PRODUCTS_BY_MONTH: &str = "/api/products/month/{month}";
/// The route for searching transactions one page at a time.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the sales totals of a month.
pub const STATISTICS: &str = "/api/transactions/statistics";
/// The route for the price histogram of a month.
pub const BAR_CHART: &str = "/api/transactions/barchart";
/// The route for the category distribution of a month.
pub const PIE_CHART: &str = "/api/transactions/piechart";
/// The route for the statistics, price histogram and category distribution of a month.
pub const COMBINED_REPORT: &str = "/api/combined-data";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::INITIALIZE);
        assert_endpoint_is_valid_uri(endpoints::PRODUCTS);
        assert_endpoint_is_valid_uri(endpoints::PRODUCTS_BY_MONTH);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::STATISTICS);
        assert_endpoint_is_valid_uri(endpoints::BAR_CHART);
        assert_endpoint_is_valid_uri(endpoints::PIE_CHART);
        assert_endpoint_is_valid_uri(endpoints::COMBINED_REPORT);
    }
}
