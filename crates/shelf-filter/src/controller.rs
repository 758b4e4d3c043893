//! The shop page controller.
//!
//! [`ShopController`] owns the last catalog snapshot, the facets derived from
//! it and the current [`FilterState`]. Shopper actions replace the state with
//! a new one; the filtered result and the [`ShopView`] are recomputed on
//! request, never cached.

use shelf_core::CatalogItem;

use crate::binding::{self, ChipAction, ShopView};
use crate::facets::{extract_facets, FacetSet};
use crate::predicate::{evaluate, FilterOutcome};
use crate::route::{search_param, shop_location, Navigator};
use crate::state::{FilterState, PriceInput, RatingThreshold, Section, SetField};

/// Outcome of the latest catalog fetch, as reported by the catalog source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Failed(String),
    Ready(Vec<CatalogItem>),
}

impl CatalogStatus {
    /// Items of a ready catalog; loading and failed catalogs have none.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        match self {
            CatalogStatus::Ready(items) => items,
            CatalogStatus::Loading | CatalogStatus::Failed(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShopController {
    status: CatalogStatus,
    facets: FacetSet,
    state: FilterState,
}

impl ShopController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a controller for a catalog that is already loaded.
    #[must_use]
    pub fn with_catalog(items: Vec<CatalogItem>) -> Self {
        let mut controller = Self::new();
        controller.on_catalog(CatalogStatus::Ready(items));
        controller
    }

    /// Replaces the catalog snapshot wholesale.
    ///
    /// Facets are re-derived and the price inputs re-seeded from the new
    /// bounds; selections and the search term carry over.
    pub fn on_catalog(&mut self, status: CatalogStatus) {
        match &status {
            CatalogStatus::Loading => tracing::debug!("catalog loading"),
            CatalogStatus::Failed(message) => {
                tracing::warn!(error = %message, "catalog unavailable");
            }
            CatalogStatus::Ready(items) => {
                tracing::info!(items = items.len(), "catalog snapshot received");
            }
        }

        self.facets = extract_facets(status.items());
        self.state = self.state.seed_price_defaults(self.facets.price_bounds);
        self.status = status;
    }

    /// Syncs the search term from the location's query string.
    pub fn on_location_change(&mut self, query: &str) {
        let term = search_param(query);
        self.state = self.state.set_search_term(&term);
    }

    pub fn toggle_membership(&mut self, field: SetField, value: &str) {
        self.state = self.state.toggle_membership(field, value);
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.state = self.state.toggle_category(category);
    }

    pub fn toggle_type(&mut self, item_type: &str) {
        self.state = self.state.toggle_type(item_type);
    }

    pub fn toggle_rating(&mut self, threshold: RatingThreshold) {
        self.state = self.state.toggle_rating(threshold);
    }

    pub fn set_price(&mut self, field: PriceInput, input: &str) {
        self.state = self.state.set_scalar(field, input);
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.state = self.state.set_search_term(term);
    }

    pub fn toggle_section(&mut self, section: Section) {
        self.state = self.state.toggle_section_expanded(section);
    }

    pub fn set_mobile_filters_open(&mut self, open: bool) {
        self.state = self.state.with_mobile_filters_open(open);
    }

    pub fn reset_price(&mut self) {
        self.state = self.state.reset_price(self.facets.price_bounds);
    }

    /// Runs the dismiss action attached to an active-filter chip.
    pub fn dismiss_chip(&mut self, action: &ChipAction) {
        match action {
            ChipAction::ToggleCategory(category) => self.toggle_category(category),
            ChipAction::ToggleType(item_type) => self.toggle_type(item_type),
            ChipAction::ToggleRating(threshold) => self.toggle_rating(*threshold),
            ChipAction::ResetPrice => self.reset_price(),
        }
    }

    /// "Clear all": resets every filter and returns to the bare shop route.
    pub fn clear_all(&mut self, navigator: &mut impl Navigator) {
        self.state = self.state.reset_to_defaults(self.facets.price_bounds);
        navigator.navigate(&shop_location(None));
    }

    /// "Clear search": drops the term only and returns to the bare shop route.
    pub fn clear_search(&mut self, navigator: &mut impl Navigator) {
        self.state = self.state.set_search_term("");
        navigator.navigate(&shop_location(None));
    }

    #[must_use]
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        self.status.items()
    }

    #[must_use]
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Filtered items to display, after the empty-result fallback.
    #[must_use]
    pub fn outcome(&self) -> FilterOutcome<'_> {
        evaluate(self.items(), &self.state, self.facets.price_bounds)
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&CatalogItem> {
        self.outcome().items
    }

    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.state.active_filter_count(self.facets.price_bounds)
    }

    /// Everything the shop page renders, derived from the current state.
    #[must_use]
    pub fn view(&self) -> ShopView<'_> {
        binding::render(&self.status, &self.facets, &self.state, self.outcome())
    }
}
