//! Price normalization for loosely typed catalog prices.
//!
//! Catalog prices arrive either as numbers or as currency-formatted text such
//! as `"$1,299.00"`. Everything is normalized to an `f64` where `0.0` means
//! "no usable price".

use serde_json::Value;
use shelf_core::CatalogItem;

/// Converts a raw price field into a non-negative number.
///
/// Numbers are returned unchanged when finite and non-negative. Text keeps
/// only digits, the first decimal point and a leading minus before parsing.
/// Anything else, a parse failure, or a negative result yields `0.0`.
#[must_use]
pub fn normalize_price(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price_text(s),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(text.len());
    let mut seen_point = false;

    for c in text.chars() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push(c);
            }
            '-' if cleaned.is_empty() => cleaned.push(c),
            _ => {}
        }
    }

    cleaned.parse::<f64>().ok()
}

/// Effective price of an item: the discounted price when it carries a usable
/// value, otherwise the original price, otherwise `0.0`.
#[must_use]
pub fn effective_price(item: &CatalogItem) -> f64 {
    [&item.discount_price, &item.old_price]
        .into_iter()
        .map(normalize_price)
        .find(|price| *price > 0.0)
        .unwrap_or(0.0)
}

/// Leading-integer parse of an editable price input.
///
/// Skips leading whitespace, accepts an optional sign, then reads digits up to
/// the first non-digit (`"15.75"` is `15`, `"12abc"` is `12`). Returns `None`
/// when no digits are found. Values beyond `i64` saturate.
#[must_use]
pub fn parse_price_input(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
