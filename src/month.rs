//! Conversion between English month names and calendar months.
//!
//! This is the only place that decides whether a month name is valid.

use time::Month;

use crate::Error;

/// The canonical month names in calendar order.
///
/// Index `i` holds the name of month number `i + 1`.
const MONTH_NAMES: [(&str, Month); 12] = [
    ("January", Month::January),
    ("February", Month::February),
    ("March", Month::March),
    ("April", Month::April),
    ("May", Month::May),
    ("June", Month::June),
    ("July", Month::July),
    ("August", Month::August),
    ("September", Month::September),
    ("October", Month::October),
    ("November", Month::November),
    ("December", Month::December),
];

/// Parse a canonical English month name, e.g. "March".
///
/// Names are matched exactly, so "march" and "Mar" are rejected.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of the twelve month names.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    MONTH_NAMES
        .iter()
        .find(|(month_name, _)| *month_name == name)
        .map(|(_, month)| *month)
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// Parse a month that an operation requires.
///
/// Empty strings count as missing, the same as `None`.
///
/// # Errors
/// Returns [Error::MissingMonth] if no month was given, or [Error::InvalidMonth]
/// if the month name is not valid.
pub(crate) fn parse_required_month(name: Option<&str>) -> Result<Month, Error> {
    match name {
        None | Some("") => Err(Error::MissingMonth),
        Some(name) => parse_month(name),
    }
}

/// Get the canonical English name of `month`.
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month as usize - 1].0
}
