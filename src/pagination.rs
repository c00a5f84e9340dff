//! This modules defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// The raw paging parameters of a request.
///
/// Each value is read from its leading digits, so "2abc" is 2 and "5.9" is 5.
/// Values that are missing, have no leading digits or are less than one fall
/// back to the defaults in [PaginationConfig].
#[derive(Debug, Default, Clone)]
pub(crate) struct PageQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl PageQuery {
    /// Resolve the page number and page size, applying defaults from `config`.
    pub(crate) fn resolve(&self, config: &PaginationConfig) -> (u64, u64) {
        let parse = |value: &Option<String>, default: u64| {
            value
                .as_deref()
                .and_then(parse_leading_integer)
                .filter(|&value| value >= 1)
                .unwrap_or(default)
        };

        (
            parse(&self.page, config.default_page.max(1)),
            parse(&self.per_page, config.default_page_size.max(1)),
        )
    }
}

/// Parse the digits at the start of `value`, ignoring leading whitespace and a
/// plus sign. Anything after the digits is ignored.
fn parse_leading_integer(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits_end = value
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(value.len());

    value[..digits_end].parse().ok()
}

/// One page of records along with the information needed to request other pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The page number, starting from one.
    pub page: u64,
    /// The maximum number of records on a page.
    pub per_page: u64,
    /// The number of records across all pages.
    pub total_records: u64,
    /// The number of pages needed to hold all records, zero if there are no records.
    pub total_pages: u64,
    /// The records on this page.
    pub records: Vec<T>,
}

/// Take the records for page number `page` of size `per_page` from `records`.
///
/// Pages past the last page are empty. A `page` or `per_page` of zero is
/// treated as one.
pub fn paginate<T>(records: Vec<T>, page: u64, per_page: u64) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let total_records = records.len() as u64;
    let total_pages = total_records.div_ceil(per_page);
    let offset = (page - 1).saturating_mul(per_page);

    let records = records
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .collect();

    Page {
        page,
        per_page,
        total_records,
        total_pages,
        records,
    }
}
