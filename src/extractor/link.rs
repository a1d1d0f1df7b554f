//! Link extraction.

use dom_query::Selection;

use crate::dom;
use crate::url_utils;

/// First anchor with a non-empty `href`, resolved against the page URL.
///
/// Returns an empty string when the container has no usable anchor.
#[must_use]
pub fn extract(container: &Selection<'_>, page_url: &str) -> String {
    dom::find_first(container, "a[href]", |a| dom::has_value(a, "href"))
        .map(|a| url_utils::resolve_link(&dom::attr(&a, "href"), page_url))
        .unwrap_or_default()
}
