use serde::Serialize;
use shelf_core::{CatalogItem, TextField};

use crate::price::effective_price;

/// Observed price range of a catalog, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

/// Filter options derived from a catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetSet {
    /// Distinct non-empty categories in first-seen order.
    pub categories: Vec<String>,
    /// Distinct non-empty types in first-seen order.
    pub types: Vec<String>,
    pub price_bounds: PriceBounds,
}

/// Derives category and type facets and the price bounds of a catalog.
///
/// Items missing a field only drop out of that facet. Bounds span the floor
/// of the lowest and the ceiling of the highest positive effective price, and
/// default to `{0, 1000}` when no item has a usable price.
#[must_use]
pub fn extract_facets(items: &[CatalogItem]) -> FacetSet {
    let facets = FacetSet {
        categories: distinct_values(items, TextField::Category),
        types: distinct_values(items, TextField::Type),
        price_bounds: price_bounds(items),
    };

    tracing::debug!(
        items = items.len(),
        categories = facets.categories.len(),
        types = facets.types.len(),
        min_price = facets.price_bounds.min,
        max_price = facets.price_bounds.max,
        "extracted catalog facets"
    );

    facets
}

fn distinct_values(items: &[CatalogItem], field: TextField) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in items.iter().filter_map(|item| item.text(field)) {
        if !value.is_empty() && !values.iter().any(|seen| seen == value) {
            values.push(value.to_owned());
        }
    }
    values
}

#[allow(clippy::cast_possible_truncation)]
fn price_bounds(items: &[CatalogItem]) -> PriceBounds {
    let mut prices = items
        .iter()
        .map(effective_price)
        .filter(|price| *price > 0.0);

    let Some(first) = prices.next() else {
        return PriceBounds::default();
    };
    let (lo, hi) = prices.fold((first, first), |(lo, hi), price| {
        (lo.min(price), hi.max(price))
    });

    PriceBounds {
        min: lo.floor() as i64,
        max: hi.ceil() as i64,
    }
}
