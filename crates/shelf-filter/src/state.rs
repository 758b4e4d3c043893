//! Filter selections and sidebar state for the shop page.
//!
//! [`FilterState`] is updated immutably: every operation borrows the current
//! state and returns the next one, leaving the original untouched.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FilterError;
use crate::facets::PriceBounds;
use crate::price::parse_price_input;

/// A minimum-rating selection ("N & Up"), from 1 to 4 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RatingThreshold(u8);

impl RatingThreshold {
    /// Thresholds in the order the sidebar lists them.
    pub const OPTIONS: [RatingThreshold; 4] = [
        RatingThreshold(4),
        RatingThreshold(3),
        RatingThreshold(2),
        RatingThreshold(1),
    ];

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingThreshold {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=4).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FilterError::InvalidRating(value.to_string()))
        }
    }
}

impl FromStr for RatingThreshold {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| FilterError::InvalidRating(s.to_owned()))
            .and_then(Self::try_from)
    }
}

impl std::fmt::Display for RatingThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set-valued filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Categories,
    Types,
    Ratings,
}

/// The two editable price inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceInput {
    Min,
    Max,
}

/// Collapsible sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Categories,
    Price,
    Ratings,
    Type,
}

/// Per-section visibility flags. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpandedSections {
    pub categories: bool,
    pub price: bool,
    pub ratings: bool,
    pub types: bool,
}

impl Default for ExpandedSections {
    fn default() -> Self {
        Self {
            categories: true,
            price: true,
            ratings: true,
            types: true,
        }
    }
}

impl ExpandedSections {
    #[must_use]
    pub fn is_expanded(&self, section: Section) -> bool {
        match section {
            Section::Categories => self.categories,
            Section::Price => self.price,
            Section::Ratings => self.ratings,
            Section::Type => self.types,
        }
    }

    fn flag_mut(&mut self, section: Section) -> &mut bool {
        match section {
            Section::Categories => &mut self.categories,
            Section::Price => &mut self.price,
            Section::Ratings => &mut self.ratings,
            Section::Type => &mut self.types,
        }
    }
}

/// Everything the shopper has selected, plus sidebar expansion flags.
///
/// `min_price` and `max_price` mirror the editable inputs and stay text; an
/// empty string means "use the catalog bound".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_term: String,
    pub categories: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub ratings: BTreeSet<RatingThreshold>,
    pub min_price: String,
    pub max_price: String,
    pub expanded: ExpandedSections,
    pub mobile_filters_open: bool,
}

fn toggled<T: Ord + Clone>(set: &BTreeSet<T>, value: T) -> BTreeSet<T> {
    let mut next = set.clone();
    if !next.remove(&value) {
        next.insert(value);
    }
    next
}

impl FilterState {
    /// Adds `value` to a set-valued field, or removes it if already selected.
    ///
    /// Rating values must parse as a [`RatingThreshold`]; anything else leaves
    /// the state unchanged.
    #[must_use]
    pub fn toggle_membership(&self, field: SetField, value: &str) -> Self {
        match field {
            SetField::Categories => self.toggle_category(value),
            SetField::Types => self.toggle_type(value),
            SetField::Ratings => match value.parse::<RatingThreshold>() {
                Ok(threshold) => self.toggle_rating(threshold),
                Err(e) => {
                    tracing::debug!(error = %e, "ignoring rating toggle");
                    self.clone()
                }
            },
        }
    }

    #[must_use]
    pub fn toggle_category(&self, category: &str) -> Self {
        Self {
            categories: toggled(&self.categories, category.to_owned()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_type(&self, item_type: &str) -> Self {
        Self {
            types: toggled(&self.types, item_type.to_owned()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_rating(&self, threshold: RatingThreshold) -> Self {
        Self {
            ratings: toggled(&self.ratings, threshold),
            ..self.clone()
        }
    }

    /// Stores a price input as typed by the shopper.
    ///
    /// Empty input stays empty. Anything else is read as a leading integer,
    /// clamped to zero or above; unparsable text becomes `"0"`.
    #[must_use]
    pub fn set_scalar(&self, field: PriceInput, input: &str) -> Self {
        let value = if input.is_empty() {
            String::new()
        } else {
            parse_price_input(input).unwrap_or(0).max(0).to_string()
        };

        let mut next = self.clone();
        match field {
            PriceInput::Min => next.min_price = value,
            PriceInput::Max => next.max_price = value,
        }
        next
    }

    #[must_use]
    pub fn set_search_term(&self, term: &str) -> Self {
        Self {
            search_term: term.to_owned(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn toggle_section_expanded(&self, section: Section) -> Self {
        let mut next = self.clone();
        let flag = next.expanded.flag_mut(section);
        *flag = !*flag;
        next
    }

    #[must_use]
    pub fn with_mobile_filters_open(&self, open: bool) -> Self {
        Self {
            mobile_filters_open: open,
            ..self.clone()
        }
    }

    /// Seeds both price inputs from freshly derived catalog bounds.
    #[must_use]
    pub fn seed_price_defaults(&self, bounds: PriceBounds) -> Self {
        Self {
            min_price: bounds.min.to_string(),
            max_price: bounds.max.to_string(),
            ..self.clone()
        }
    }

    /// Restores both price inputs to the bounds; dismisses the price chip.
    #[must_use]
    pub fn reset_price(&self, bounds: PriceBounds) -> Self {
        self.seed_price_defaults(bounds)
    }

    /// "Clear all": drops every selection and the search term.
    ///
    /// Section expansion and the mobile panel flag are presentational and
    /// survive the reset.
    #[must_use]
    pub fn reset_to_defaults(&self, bounds: PriceBounds) -> Self {
        Self {
            search_term: String::new(),
            categories: BTreeSet::new(),
            types: BTreeSet::new(),
            ratings: BTreeSet::new(),
            min_price: bounds.min.to_string(),
            max_price: bounds.max.to_string(),
            expanded: self.expanded,
            mobile_filters_open: self.mobile_filters_open,
        }
    }

    /// `true` when the minimum price input deviates from the lower bound.
    #[must_use]
    pub fn min_price_active(&self, bounds: PriceBounds) -> bool {
        !self.min_price.is_empty() && self.min_price != bounds.min.to_string()
    }

    /// `true` when the maximum price input deviates from the upper bound.
    #[must_use]
    pub fn max_price_active(&self, bounds: PriceBounds) -> bool {
        !self.max_price.is_empty() && self.max_price != bounds.max.to_string()
    }

    /// Number of active filters shown on the mobile Filters badge.
    ///
    /// Each deviating price boundary counts on its own, so a fully custom
    /// price range counts as two.
    #[must_use]
    pub fn active_filter_count(&self, bounds: PriceBounds) -> usize {
        self.categories.len()
            + self.types.len()
            + self.ratings.len()
            + usize::from(self.min_price_active(bounds))
            + usize::from(self.max_price_active(bounds))
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
