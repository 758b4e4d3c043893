//! Catalog filtering and facet derivation for the shop page.
//!
//! Everything here is synchronous and pure over an in-memory catalog
//! snapshot. [`ShopController`] ties the pieces together: it owns the last
//! snapshot, the derived [`FacetSet`] and the [`FilterState`], and exposes the
//! filtered result and the [`ShopView`] as derived views.

pub mod binding;
pub mod controller;
pub mod error;
pub mod facets;
pub mod predicate;
pub mod price;
pub mod route;
pub mod state;

pub use binding::ShopView;
pub use controller::{CatalogStatus, ShopController};
pub use error::FilterError;
pub use facets::{extract_facets, FacetSet, PriceBounds};
pub use predicate::{apply_filters, display_items, evaluate, matches, FilterOutcome};
pub use price::{effective_price, normalize_price, parse_price_input};
pub use route::{search_param, shop_location, Navigator, RecordingNavigator, SEARCH_PARAM, SHOP_ROUTE};
pub use state::{FilterState, PriceInput, RatingThreshold, Section, SetField};
