//! Builds the filter used to select transactions by search text and month.

use time::Month;

use crate::{Error, month::parse_month};

use super::Transaction;

/// Selects transactions by a free-text search term and an optional month.
///
/// The filter matches when both parts match:
/// - the search part matches if the title or description contains the search term
///   (ignoring case), or if the term is a number equal to the price. An empty
///   search term matches everything.
/// - the month part matches if the transaction was sold in the month, in any year.
///   No month matches everything.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    search: Option<SearchTerm>,
    month: Option<Month>,
}

#[derive(Debug, Clone, PartialEq)]
struct SearchTerm {
    /// The lowercased search text.
    text: String,
    /// The search text as a price, if it is a number.
    price: Option<f64>,
}

impl SearchTerm {
    fn new(search: &str) -> Self {
        let price = search
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Self {
            text: search.to_lowercase(),
            price,
        }
    }

    fn matches(&self, transaction: &Transaction) -> bool {
        transaction.title.to_lowercase().contains(&self.text)
            || transaction.description.to_lowercase().contains(&self.text)
            || self.price.is_some_and(|price| transaction.price == price)
    }
}

impl TransactionFilter {
    /// A filter that matches every transaction.
    pub fn all() -> Self {
        Self {
            search: None,
            month: None,
        }
    }

    /// Build a filter from the raw `search` and `month` request parameters.
    ///
    /// Empty strings are treated the same as missing parameters.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is given but is not a month name.
    pub fn new(search: Option<&str>, month: Option<&str>) -> Result<Self, Error> {
        let month = match month {
            None | Some("") => None,
            Some(name) => Some(parse_month(name)?),
        };

        Ok(Self::all().with_search(search.unwrap_or_default()).with_month(month))
    }

    /// Only match transactions that contain `search` in their title or
    /// description, or whose price equals `search` as a number.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = (!search.is_empty()).then(|| SearchTerm::new(search));
        self
    }

    /// Only match transactions sold in `month`.
    pub fn with_month(mut self, month: Option<Month>) -> Self {
        self.month = month;
        self
    }

    /// The month this filter is restricted to, if any.
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// Whether `transaction` satisfies this filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let search_matches = self
            .search
            .as_ref()
            .is_none_or(|search| search.matches(transaction));
        let month_matches = self
            .month
            .is_none_or(|month| transaction.sale_month() == month);

        search_matches && month_matches
    }
}
