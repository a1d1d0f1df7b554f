//! Field Extractors
//!
//! Given one located container, each extractor produces a best-effort value
//! using an ordered list of strategies. A miss is an empty string, never an
//! error.
//!
//! # Module Structure
//!
//! - `title`: heading text, or a synthetic `Article {n}` placeholder
//! - `link`: first anchor, resolved against the page URL
//! - `date`: `<time>` markers and date-classed elements, normalized to ISO
//! - `description`: excerpt element, or the container text minus its first line
//!
//! Images are handled by [`crate::image`], which has its own strategy types.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rssbridge::extractor;
//! use rssbridge::image::FirstMatchChain;
//!
//! let chain = FirstMatchChain::for_document(&doc, &opts);
//! for container in locator::locate(&doc, &opts) {
//!     let fields = extractor::extract_fields(&container, page_url, &chain, &[], &opts);
//!     if let Some(item) = fields.into_item(&opts) {
//!         items.push(item);
//!     }
//! }
//! ```

pub mod date;
pub mod description;
pub mod link;
pub mod title;

use dom_query::Selection;

use crate::dom;
use crate::image::ImageSelector;
use crate::locator::Container;
use crate::options::Options;
use crate::result::ExtractedItem;

pub use title::Title;

/// Every field extracted from one container, before the title check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    pub title: Title,
    pub link: String,
    pub description: String,
    pub date: String,
    pub image: String,
}

impl Fields {
    /// Whether these fields would survive the title discard rule.
    #[must_use]
    pub fn is_usable(&self, opts: &Options) -> bool {
        self.title.is_usable(opts)
    }

    /// Convert to an item, discarding placeholder and too-short titles.
    #[must_use]
    pub fn into_item(self, opts: &Options) -> Option<ExtractedItem> {
        if !self.is_usable(opts) {
            return None;
        }

        Some(ExtractedItem {
            title: self.title.text,
            link: self.link,
            description: self.description,
            image: self.image,
            pub_date: self.date,
        })
    }
}

/// Run every field extractor over one container.
///
/// `title_hints` are stored selector hints (`.class` or a bare tag) tried
/// before the heading search; pass an empty slice on first analysis.
#[must_use]
pub fn extract_fields(
    container: &Container<'_>,
    page_url: &str,
    images: &dyn ImageSelector,
    title_hints: &[String],
    opts: &Options,
) -> Fields {
    let element = &container.element;

    Fields {
        title: title::extract(container, title_hints),
        link: link::extract(element, page_url),
        description: description::extract(element, opts),
        date: date::extract(element, opts),
        image: images.select(element, page_url),
    }
}

/// Find the first descendant matching a stored selector hint.
///
/// Hints are never handed to the CSS engine. `.name` matches an element
/// carrying that exact class token; a bare alphanumeric tag matches by tag.
/// Anything else is ignored.
#[must_use]
pub fn find_by_hint<'a>(element: &Selection<'a>, hint: &str) -> Option<Selection<'a>> {
    let hint = hint.trim();

    if let Some(class) = hint.strip_prefix('.') {
        if class.is_empty() || class.contains(|c: char| c.is_whitespace() || c == '.') {
            return None;
        }
        return dom::find_first(element, "[class]", |el| {
            dom::class_list(el).iter().any(|c| c == class)
        });
    }

    let tag = hint.to_ascii_lowercase();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    dom::first(element, &tag)
}
