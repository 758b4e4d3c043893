//! Catalog items as the storefront API serves them.
//!
//! Catalog data is loosely typed: prices arrive as numbers or as
//! currency-formatted text, ratings may be missing, and text fields may hold
//! anything. Fields are therefore kept as raw [`serde_json::Value`]s and read
//! through accessors that treat every unexpected shape as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A book, audiobook, ebook or package listed in the shop.
///
/// Read-only to the filtering engine; it only derives values from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier. Mongo-style `_id` keys land in [`Self::extra`];
    /// use [`Self::identifier`] to read either.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub name: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub writer: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub category: Value,
    /// `"audiobook"`, `"ebook"`, a physical format, or absent.
    #[serde(default, rename = "type", skip_serializing_if = "Value::is_null")]
    pub item_type: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub price: Value,
    #[serde(default, rename = "discountPrice", skip_serializing_if = "Value::is_null")]
    pub discount_price: Value,
    #[serde(default, rename = "oldPrice", skip_serializing_if = "Value::is_null")]
    pub old_price: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub ratings: Value,
    /// Display-only fields (`images`, `description`, `numOfReviews`, ...)
    /// carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The text fields the shop search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Writer,
    Category,
    Type,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::Name,
        TextField::Writer,
        TextField::Category,
        TextField::Type,
    ];
}

impl CatalogItem {
    /// Returns the item identifier, preferring `id` over `_id`.
    #[must_use]
    pub fn identifier(&self) -> Option<&Value> {
        if self.id.is_null() {
            self.extra.get("_id").filter(|v| !v.is_null())
        } else {
            Some(&self.id)
        }
    }

    /// Returns the given text field when it holds a string.
    #[must_use]
    pub fn text(&self, field: TextField) -> Option<&str> {
        let value = match field {
            TextField::Name => &self.name,
            TextField::Writer => &self.writer,
            TextField::Category => &self.category,
            TextField::Type => &self.item_type,
        };
        value.as_str()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text(TextField::Name)
    }

    #[must_use]
    pub fn writer(&self) -> Option<&str> {
        self.text(TextField::Writer)
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.text(TextField::Category)
    }

    #[must_use]
    pub fn item_type(&self) -> Option<&str> {
        self.text(TextField::Type)
    }

    /// Numeric rating, or `0.0` when missing or not numeric.
    ///
    /// Numeric strings such as `"4.5"` are accepted.
    #[must_use]
    pub fn rating(&self) -> f64 {
        let parsed = match &self.ratings {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|r| r.is_finite()).unwrap_or(0.0)
    }
}
