//! View model for the shop page: sidebar, active-filter chips, banners and
//! the result list.
//!
//! The chip list and the active-filter badge share one decomposition: each
//! selected category, type and rating is a chip and counts once; the price
//! range is a single chip that appears when at least one boundary deviates,
//! while the badge counts each deviating boundary separately.

use serde::Serialize;
use shelf_core::CatalogItem;

use crate::controller::CatalogStatus;
use crate::facets::FacetSet;
use crate::predicate::FilterOutcome;
use crate::state::{FilterState, RatingThreshold};

pub const RETRY_LABEL: &str = "Retry";
pub const CLEAR_SEARCH_AND_FILTERS_LABEL: &str = "Clear Search & Filters";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusView {
    Loading,
    Error {
        message: String,
        retry_label: &'static str,
    },
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingOptionView {
    pub threshold: RatingThreshold,
    /// Filled stars out of five.
    pub stars: u8,
    pub label: String,
    pub checked: bool,
}

/// One collapsible sidebar section, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionView {
    Price {
        expanded: bool,
        min_input: String,
        max_input: String,
        range_label: String,
    },
    Categories {
        expanded: bool,
        options: Vec<OptionView>,
    },
    Types {
        expanded: bool,
        options: Vec<OptionView>,
    },
    Ratings {
        expanded: bool,
        options: Vec<RatingOptionView>,
    },
}

/// What dismissing a chip does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ChipAction {
    ToggleCategory(String),
    ToggleType(String),
    ToggleRating(RatingThreshold),
    ResetPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipView {
    pub label: String,
    pub action: ChipAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyStateView {
    pub title: String,
    pub message: String,
    /// Label of the clear action, offered only while searching.
    pub clear_label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView<'a> {
    pub status: StatusView,
    /// Count on the mobile "Filters" button; hidden at zero.
    pub filter_badge: Option<usize>,
    pub mobile_filters_open: bool,
    pub sidebar: Vec<SectionView>,
    pub chips: Vec<ChipView>,
    pub search_banner: Option<String>,
    pub results_title: String,
    pub results: Vec<&'a CatalogItem>,
    pub empty_state: Option<EmptyStateView>,
}

pub(crate) fn render<'a>(
    status: &CatalogStatus,
    facets: &FacetSet,
    state: &FilterState,
    outcome: FilterOutcome<'a>,
) -> ShopView<'a> {
    let term = state.search_term.as_str();
    let results = outcome.items;

    let status_view = match status {
        CatalogStatus::Loading => StatusView::Loading,
        CatalogStatus::Failed(message) => StatusView::Error {
            message: message.clone(),
            retry_label: RETRY_LABEL,
        },
        CatalogStatus::Ready(_) => StatusView::Ready,
    };

    let search_banner = (!term.is_empty() && !results.is_empty())
        .then(|| format!("Showing {} results for \"{term}\"", results.len()));

    let results_title = if term.is_empty() {
        "All".to_string()
    } else {
        format!("Search Results for \"{term}\"")
    };

    let empty_state = (matches!(status, CatalogStatus::Ready(_)) && results.is_empty())
        .then(|| empty_state(term));

    ShopView {
        status: status_view,
        filter_badge: Some(outcome.active_filter_count).filter(|count| *count > 0),
        mobile_filters_open: state.mobile_filters_open,
        sidebar: sidebar(facets, state),
        chips: chips(facets, state),
        search_banner,
        results_title,
        results,
        empty_state,
    }
}

fn sidebar(facets: &FacetSet, state: &FilterState) -> Vec<SectionView> {
    let bounds = facets.price_bounds;
    let mut sections = vec![SectionView::Price {
        expanded: state.expanded.price,
        min_input: state.min_price.clone(),
        max_input: state.max_price.clone(),
        range_label: format!("Range: ${} - ${}", bounds.min, bounds.max),
    }];

    if !facets.categories.is_empty() {
        sections.push(SectionView::Categories {
            expanded: state.expanded.categories,
            options: options(&facets.categories, |v| state.categories.contains(v)),
        });
    }

    if !facets.types.is_empty() {
        sections.push(SectionView::Types {
            expanded: state.expanded.types,
            options: options(&facets.types, |v| state.types.contains(v)),
        });
    }

    sections.push(SectionView::Ratings {
        expanded: state.expanded.ratings,
        options: RatingThreshold::OPTIONS
            .iter()
            .map(|threshold| RatingOptionView {
                threshold: *threshold,
                stars: threshold.get(),
                label: format!("{threshold} & Up"),
                checked: state.ratings.contains(threshold),
            })
            .collect(),
    });

    sections
}

fn options(values: &[String], checked: impl Fn(&str) -> bool) -> Vec<OptionView> {
    values
        .iter()
        .map(|value| OptionView {
            value: value.clone(),
            checked: checked(value.as_str()),
        })
        .collect()
}

fn chips(facets: &FacetSet, state: &FilterState) -> Vec<ChipView> {
    let bounds = facets.price_bounds;

    let categories = state.categories.iter().map(|category| ChipView {
        label: format!("Category: {category}"),
        action: ChipAction::ToggleCategory(category.clone()),
    });
    let types = state.types.iter().map(|item_type| ChipView {
        label: format!("Type: {item_type}"),
        action: ChipAction::ToggleType(item_type.clone()),
    });
    let ratings = state.ratings.iter().map(|threshold| ChipView {
        label: format!("Rating: {threshold}+"),
        action: ChipAction::ToggleRating(*threshold),
    });

    let price_active = state.min_price_active(bounds) || state.max_price_active(bounds);
    let price = price_active.then(|| ChipView {
        label: format!(
            "Price: ${} - ${}",
            or_bound(&state.min_price, bounds.min),
            or_bound(&state.max_price, bounds.max)
        ),
        action: ChipAction::ResetPrice,
    });

    categories.chain(types).chain(ratings).chain(price).collect()
}

/// An empty price input reads as the catalog bound it stands for.
fn or_bound(input: &str, bound: i64) -> String {
    if input.is_empty() {
        bound.to_string()
    } else {
        input.to_owned()
    }
}

fn empty_state(term: &str) -> EmptyStateView {
    if term.is_empty() {
        EmptyStateView {
            title: "No books available".to_string(),
            message: "There are currently no books available in this category.".to_string(),
            clear_label: None,
        }
    } else {
        EmptyStateView {
            title: "No books found".to_string(),
            message: format!(
                "We couldn't find any books matching \"{term}\". Try adjusting your search or filters."
            ),
            clear_label: Some(CLEAR_SEARCH_AND_FILTERS_LABEL),
        }
    }
}

#[cfg(test)]
#[path = "binding_test.rs"]
mod tests;
