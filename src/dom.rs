//! DOM Utility Layer
//!
//! Thin adapter over the `dom_query` crate. Every heuristic in the crate reads
//! the document through these helpers: attribute and text accessors, ordered
//! class lists, element search and the shared [`class_signals`] test.

use dom_query::NodeId;
// Re-export core types for external use
pub use dom_query::{Document, Selection};

use crate::encoding;
use crate::error::{Error, Result};
use crate::patterns::{self, BOILERPLATE_TAGS};

// === Parsing ===

/// Parse an HTML string into a document.
///
/// html5ever never rejects markup, so this cannot fail. Use
/// [`parse_document`] for raw bytes from the network.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse raw HTML bytes, retrying once with a lenient decoder.
///
/// The primary path requires valid UTF-8. When that fails the fallback path
/// honours the page's declared charset and replaces undecodable bytes. Both
/// paths reject input that is empty or decodes to binary content.
pub fn parse_document(html: &[u8]) -> Result<Document> {
    match std::str::from_utf8(html) {
        Ok(text) => parse_checked(text),
        Err(err) => {
            tracing::debug!("Strict UTF-8 decode failed ({err}), retrying with lenient decoder");
            parse_checked(&encoding::decode_lossy(html))
        }
    }
}

fn parse_checked(text: &str) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return Err(Error::ParseError("document is empty".to_string()));
    }
    if text.contains('\0') {
        return Err(Error::ParseError("document contains binary data".to_string()));
    }

    Ok(parse(text))
}

/// Clone a document so it can be mutated without touching the original.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Remove scripts, styles and page chrome from a document in place.
pub fn strip_boilerplate(doc: &Document) {
    for tag in BOILERPLATE_TAGS {
        doc.select(tag).remove();
    }
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, trimmed, or an empty string when missing.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    sel.attr(name).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Check if a non-blank attribute exists
#[inline]
#[must_use]
pub fn has_value(sel: &Selection, name: &str) -> bool {
    sel.attr(name).is_some_and(|v| !v.trim().is_empty())
}

/// Get all attributes as key-value pairs
///
/// Returns empty vector if node has no attributes or if selection is empty.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a declared pixel dimension such as `width="120"` or `width="120px"`.
#[must_use]
pub fn dimension(sel: &Selection, name: &str) -> Option<u32> {
    let raw = attr(sel, name);
    let digits = raw.strip_suffix("px").unwrap_or(&raw).trim();
    digits.parse().ok()
}

// === Tag / Class Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get tag name, or an empty string for an empty selection.
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    tag_name(sel).unwrap_or_default()
}

/// Ordered class tokens of an element. Duplicates are kept.
#[must_use]
pub fn class_list(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Whether any class token contains any keyword, case-insensitively.
///
/// This is the single class-membership test used by every heuristic.
#[must_use]
pub fn class_signals(sel: &Selection, keywords: &[&str]) -> bool {
    sel.attr("class")
        .is_some_and(|c| classes_signal(c.split_whitespace(), keywords))
}

/// [`class_signals`] over an already extracted class list.
#[must_use]
pub fn classes_signal<I, S>(classes: I, keywords: &[&str]) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classes.into_iter().any(|class| {
        let class = class.as_ref().to_lowercase();
        keywords.iter().any(|kw| class.contains(kw))
    })
}

// === Text Content ===

/// All text of an element and its descendants, trimmed.
#[inline]
#[must_use]
pub fn text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// All text of an element with whitespace runs collapsed.
#[inline]
#[must_use]
pub fn collapsed_text(sel: &Selection) -> String {
    patterns::collapse_whitespace(&sel.text())
}

// === Querying ===

/// Identity of the first node in a selection.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|n| n.id)
}

/// All descendants matching a CSS selector, as single-node selections in
/// document order.
#[must_use]
pub fn elements<'a>(sel: &Selection<'a>, css: &str) -> Vec<Selection<'a>> {
    sel.select(css)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// All elements of a document matching a CSS selector, in document order.
#[must_use]
pub fn document_elements<'a>(doc: &'a Document, css: &str) -> Vec<Selection<'a>> {
    doc.select(css)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First descendant matching a CSS selector.
#[must_use]
pub fn first<'a>(sel: &Selection<'a>, css: &str) -> Option<Selection<'a>> {
    sel.select(css).nodes().first().map(|node| Selection::from(*node))
}

/// First descendant matching a CSS selector and a predicate.
#[must_use]
pub fn find_first<'a, P>(sel: &Selection<'a>, css: &str, pred: P) -> Option<Selection<'a>>
where
    P: Fn(&Selection<'a>) -> bool,
{
    elements(sel, css).into_iter().find(|el| pred(el))
}

/// Parent element, if the node has one.
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    let parent = sel.parent();
    parent.exists().then_some(parent)
}
