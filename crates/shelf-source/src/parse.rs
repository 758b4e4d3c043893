//! Accepts the catalog payload shapes in circulation.
//!
//! - the API envelope `{"data": {"books": [...]}, "meta": {...}}`
//! - a bare `{"books": [...]}` object
//! - a top-level array of books
//!
//! Entries that are not JSON objects are skipped with a warning; everything
//! else about an entry is left to the filter engine's lenient accessors.

use serde_json::Value;
use shelf_core::CatalogItem;

use crate::error::SourceError;

/// Parses a JSON body into catalog items.
///
/// # Errors
///
/// Returns [`SourceError::Deserialize`] if `body` is not valid JSON, or
/// [`SourceError::MalformedCatalog`] if it has none of the accepted shapes.
pub fn parse_catalog_str(body: &str, context: &str) -> Result<Vec<CatalogItem>, SourceError> {
    let value: Value = serde_json::from_str(body).map_err(|e| SourceError::Deserialize {
        context: context.to_owned(),
        source: e,
    })?;
    parse_catalog(value, context)
}

/// Extracts catalog items from an already-decoded payload.
///
/// # Errors
///
/// Returns [`SourceError::MalformedCatalog`] when no book list can be found.
pub fn parse_catalog(value: Value, context: &str) -> Result<Vec<CatalogItem>, SourceError> {
    let entries = book_list(value).map_err(|reason| SourceError::MalformedCatalog {
        context: context.to_owned(),
        reason,
    })?;

    let total = entries.len();
    let mut items = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!(context, index, "skipping catalog entry that is not an object");
            continue;
        }
        let item = serde_json::from_value::<CatalogItem>(entry).map_err(|e| {
            SourceError::Deserialize {
                context: format!("{context} entry {index}"),
                source: e,
            }
        })?;
        items.push(item);
    }

    tracing::debug!(context, total, kept = items.len(), "parsed catalog payload");
    Ok(items)
}

fn book_list(value: Value) -> Result<Vec<Value>, String> {
    match value {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut object) => {
            if let Some(Value::Object(mut data)) = object.remove("data") {
                return match data.remove("books") {
                    Some(Value::Array(entries)) => Ok(entries),
                    Some(other) => Err(format!("\"data.books\" is {}", kind(&other))),
                    None => Err("\"data\" has no \"books\" field".to_owned()),
                };
            }
            match object.remove("books") {
                Some(Value::Array(entries)) => Ok(entries),
                Some(other) => Err(format!("\"books\" is {}", kind(&other))),
                None => Err("object has no \"books\" field".to_owned()),
            }
        }
        other => Err(format!("top-level value is {}", kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
