//! Price sanitization
//!
//! Upstream rows carry prices as numbers, localized strings ("$ 1.234,56"),
//! empty strings or nulls, depending on which scraper produced them. This
//! module converts any of those shapes to a [`Decimal`], guarding all
//! downstream arithmetic. Anything unparseable or non-finite becomes zero;
//! nothing in here can fail.

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde_json::Value;

/// Convert a raw price field of any upstream shape into a [`Decimal`].
///
/// - Numbers pass through (non-finite floats become zero).
/// - Strings are stripped to `[0-9.,-]`, then parsed with the rightmost of
///   `.`/`,` treated as the decimal separator and the other as grouping, so
///   `"1.234,56"` and `"1,234.56"` both read as `1234.56`.
/// - Null, booleans, arrays, objects and garbage strings become zero.
#[must_use]
pub fn sanitize_price(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(s) => sanitize_str(s),
        _ => Decimal::ZERO,
    }
}

/// Parse a price out of a free-form string.
fn sanitize_str(raw: &str) -> Decimal {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    if stripped.is_empty() {
        return Decimal::ZERO;
    }

    let last_dot = stripped.rfind('.');
    let last_comma = stripped.rfind(',');

    // The rightmost of '.'/',' is the decimal separator; every other
    // occurrence of either character is grouping and is dropped.
    let decimal_sep = match (last_dot, last_comma) {
        (Some(d), Some(c)) => {
            if d > c {
                Some(d)
            } else {
                Some(c)
            }
        }
        (Some(d), None) => Some(d),
        (None, Some(c)) => Some(c),
        (None, None) => None,
    };

    let normalized: String = stripped
        .char_indices()
        .filter_map(|(i, c)| match c {
            '.' | ',' => (Some(i) == decimal_sep).then_some('.'),
            _ => Some(c),
        })
        .collect();

    normalized.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}
