//! Lenient numeric parsing for user-entered fields.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a user-entered amount.
///
/// Blank or malformed input is `None`. Thousands separators and a leading
/// `$` are tolerated; scientific notation is accepted.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
