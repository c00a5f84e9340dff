//! Price histogram for the sales in a month.
//!
//! Prices are grouped into fixed buckets of roughly one hundred currency units:
//! `0-100`, `101-200`, ..., `801-900`, and `Other` for everything from 901 up.

use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    transaction::{Transaction, TransactionFilter, get_filtered_transactions},
};

/// The lower bound of each price bucket, followed by the lower bound of the
/// overflow bucket. A price `p` is in bucket `i` when
/// `PRICE_BOUNDARIES[i] <= p < PRICE_BOUNDARIES[i + 1]`.
pub const PRICE_BOUNDARIES: [u32; 10] = [0, 101, 201, 301, 401, 501, 601, 701, 801, 901];

/// The label of the bucket for prices past the last boundary.
pub const OVERFLOW_LABEL: &str = "Other";

/// The number of buckets, including the overflow bucket.
const BUCKET_COUNT: usize = PRICE_BOUNDARIES.len();

/// A price range in the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBucket {
    /// The range starting at `PRICE_BOUNDARIES[i]` and ending just before
    /// `PRICE_BOUNDARIES[i + 1]`.
    Range(usize),
    /// Prices of at least the last boundary.
    ///
    /// Prices that are not numbers or are negative also end up here, though
    /// stored prices are never negative.
    Other,
}

impl PriceBucket {
    /// Every bucket in increasing order of price.
    pub fn all() -> impl Iterator<Item = PriceBucket> {
        (0..BUCKET_COUNT - 1)
            .map(PriceBucket::Range)
            .chain(std::iter::once(PriceBucket::Other))
    }

    /// Find the bucket that `price` belongs to.
    pub fn for_price(price: f64) -> Self {
        PRICE_BOUNDARIES
            .windows(2)
            .position(|bounds| f64::from(bounds[0]) <= price && price < f64::from(bounds[1]))
            .map_or(PriceBucket::Other, PriceBucket::Range)
    }

    /// The smallest price in this bucket.
    pub fn lower_bound(self) -> u32 {
        match self {
            PriceBucket::Range(index) => PRICE_BOUNDARIES[index],
            PriceBucket::Other => PRICE_BOUNDARIES[BUCKET_COUNT - 1],
        }
    }

    /// A label for the bucket, e.g. "101-200" or "Other".
    pub fn label(self) -> String {
        match self {
            PriceBucket::Range(index) => {
                format!("{}-{}", PRICE_BOUNDARIES[index], PRICE_BOUNDARIES[index + 1] - 1)
            }
            PriceBucket::Other => OVERFLOW_LABEL.to_owned(),
        }
    }

    fn index(self) -> usize {
        match self {
            PriceBucket::Range(index) => index,
            PriceBucket::Other => BUCKET_COUNT - 1,
        }
    }
}

/// The number of transactions in a price bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartEntry {
    /// The label of the price bucket, e.g. "0-100".
    pub bucket_label: String,
    /// The smallest price in the bucket.
    pub lower_bound: u32,
    /// The number of transactions with a price in the bucket.
    pub count: u64,
}

/// Count the `transactions` in each price bucket.
///
/// Every bucket is included, in increasing order of price, even when its
/// count is zero.
pub fn bucket_prices(transactions: &[Transaction]) -> Vec<BarChartEntry> {
    let mut counts = [0u64; BUCKET_COUNT];

    for transaction in transactions {
        counts[PriceBucket::for_price(transaction.price).index()] += 1;
    }

    PriceBucket::all()
        .map(|bucket| BarChartEntry {
            bucket_label: bucket.label(),
            lower_bound: bucket.lower_bound(),
            count: counts[bucket.index()],
        })
        .collect()
}

/// Get the price histogram for the transactions sold in `month` of any year.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read.
pub fn get_bar_chart(month: Month, connection: &Connection) -> Result<Vec<BarChartEntry>, Error> {
    let filter = TransactionFilter::all().with_month(Some(month));
    let transactions = get_filtered_transactions(&filter, connection)?;

    Ok(bucket_prices(&transactions))
}
