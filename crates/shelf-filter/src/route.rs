//! Keeps the shop's `search` query parameter in step with the filter state.
//!
//! The URL is the source of the initial search term; after that the
//! in-memory state is authoritative until the next navigation.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Path of the shop page.
pub const SHOP_ROUTE: &str = "/shop";

/// Name of the only filter criterion persisted in the URL.
pub const SEARCH_PARAM: &str = "search";

/// Characters left as-is in query values, matching `encodeURIComponent`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Something that can move the shopper to another location.
pub trait Navigator {
    fn navigate(&mut self, location: &str);
}

/// A [`Navigator`] that only records where it was sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Vec<String>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The most recent location, if any navigation happened.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, location: &str) {
        tracing::debug!(location, "navigate");
        self.history.push(location.to_owned());
    }
}

/// Reads the `search` parameter from a query string.
///
/// The leading `?` is optional, `+` decodes to a space and percent escapes
/// are decoded. The first occurrence wins; absent means `""`.
#[must_use]
pub fn search_param(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == SEARCH_PARAM)
        .map(|(_, value)| decode_component(value))
        .unwrap_or_default()
}

/// Builds the shop location, carrying the search term when non-empty.
#[must_use]
pub fn shop_location(search: Option<&str>) -> String {
    match search.filter(|term| !term.is_empty()) {
        Some(term) => format!(
            "{SHOP_ROUTE}?{SEARCH_PARAM}={}",
            utf8_percent_encode(term, QUERY_VALUE)
        ),
        None => SHOP_ROUTE.to_owned(),
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
