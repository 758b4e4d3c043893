//! The per-item filter predicate and the derived result set.

use std::collections::BTreeSet;

use serde::Serialize;
use shelf_core::{CatalogItem, TextField};

use crate::facets::PriceBounds;
use crate::price::{effective_price, parse_price_input};
use crate::state::FilterState;

/// Filtered items plus the active-filter summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome<'a> {
    pub items: Vec<&'a CatalogItem>,
    pub active_filter_count: usize,
}

/// Returns `true` when `item` passes every active criterion in `state`.
///
/// Clauses are ANDed; an empty search term or an empty selection set passes
/// everything for that clause.
#[must_use]
pub fn matches(item: &CatalogItem, state: &FilterState, bounds: PriceBounds) -> bool {
    passes(item, state, &state.search_term.to_lowercase(), bounds)
}

/// Applies `state` to the catalog, preserving catalog order.
#[must_use]
pub fn apply_filters<'a>(
    items: &'a [CatalogItem],
    state: &FilterState,
    bounds: PriceBounds,
) -> Vec<&'a CatalogItem> {
    let needle = state.search_term.to_lowercase();
    let filtered: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| passes(item, state, &needle, bounds))
        .collect();

    tracing::debug!(
        total = items.len(),
        matched = filtered.len(),
        "applied catalog filters"
    );

    filtered
}

/// Chooses what the shop displays for a filter result.
///
/// When nothing matches although the catalog has items and no search or
/// filter is active, the full catalog is shown instead of an empty page.
#[must_use]
pub fn display_items<'a>(
    items: &'a [CatalogItem],
    filtered: Vec<&'a CatalogItem>,
    state: &FilterState,
    bounds: PriceBounds,
) -> Vec<&'a CatalogItem> {
    let nothing_active =
        state.search_term.is_empty() && state.active_filter_count(bounds) == 0;

    if filtered.is_empty() && !items.is_empty() && nothing_active {
        tracing::debug!("no matches with default filters; showing full catalog");
        return items.iter().collect();
    }
    filtered
}

/// Filters the catalog and applies the display fallback in one step.
#[must_use]
pub fn evaluate<'a>(
    items: &'a [CatalogItem],
    state: &FilterState,
    bounds: PriceBounds,
) -> FilterOutcome<'a> {
    let filtered = apply_filters(items, state, bounds);
    FilterOutcome {
        items: display_items(items, filtered, state, bounds),
        active_filter_count: state.active_filter_count(bounds),
    }
}

/// `needle` is the lowercased search term, computed once per pass.
fn passes(item: &CatalogItem, state: &FilterState, needle: &str, bounds: PriceBounds) -> bool {
    matches_search(item, needle)
        && matches_selection(item.category(), &state.categories)
        && matches_selection(item.item_type(), &state.types)
        && matches_price(item, state, bounds)
        && matches_rating(item, state)
}

fn matches_search(item: &CatalogItem, needle: &str) -> bool {
    needle.is_empty()
        || TextField::ALL
            .iter()
            .filter_map(|field| item.text(*field))
            .any(|value| value.to_lowercase().contains(needle))
}

fn matches_selection(value: Option<&str>, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || value.is_some_and(|v| selected.contains(v))
}

/// Resolves a price input to a bound, falling back when it is empty,
/// unparsable or zero.
fn price_limit(input: &str, fallback: i64) -> i64 {
    parse_price_input(input)
        .filter(|value| *value != 0)
        .unwrap_or(fallback)
}

#[allow(clippy::cast_precision_loss)]
fn matches_price(item: &CatalogItem, state: &FilterState, bounds: PriceBounds) -> bool {
    let price = effective_price(item);
    let lo = price_limit(&state.min_price, bounds.min) as f64;
    let hi = price_limit(&state.max_price, bounds.max) as f64;
    lo <= price && price <= hi
}

fn matches_rating(item: &CatalogItem, state: &FilterState) -> bool {
    if state.ratings.is_empty() {
        return true;
    }
    let floored = item.rating().floor();
    state
        .ratings
        .iter()
        .any(|threshold| floored >= f64::from(threshold.get()))
}

#[cfg(test)]
#[path = "predicate_test.rs"]
mod tests;
