//! DOM-based title extraction.

use dom_query::Document;

use super::PageMetadata;
use crate::dom;

/// Text of the `<title>` element, whitespace-collapsed.
#[must_use]
pub fn examine_title_element(doc: &Document) -> Option<String> {
    dom::document_elements(doc, "title")
        .first()
        .map(dom::collapsed_text)
        .filter(|title| !title.is_empty())
}

/// Fill the title from `<title>`, falling back to the first non-empty `<h1>`.
#[must_use]
pub fn extract_dom_title(doc: &Document, original: PageMetadata) -> PageMetadata {
    let mut result = original;
    if result.title.is_some() {
        return result;
    }

    result.title = examine_title_element(doc).or_else(|| {
        dom::document_elements(doc, "h1")
            .iter()
            .map(dom::collapsed_text)
            .find(|text| !text.is_empty())
    });
    result
}
