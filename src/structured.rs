//! Structured-Content Serializer
//!
//! Turns the containers of a page into the text block handed to the AI
//! extractor. Each record is framed as
//!
//! ```text
//! ARTICLE n:
//! TITLE: ...
//! LINK: ...
//! DATE: ...
//! IMAGE: ...
//! CONTENT: ...
//! ---
//! ```
//!
//! so the model can copy exact link, image and date values instead of
//! inventing them. Empty fields stay empty. When no container yields a
//! record, the main content area (or the whole document) is returned as
//! plain text instead.

use dom_query::Document;
use tracing::debug;

use crate::dom;
use crate::extractor;
use crate::image::FirstMatchChain;
use crate::locator::{self, Container};
use crate::options::Options;
use crate::patterns::{self, MAIN_CONTENT_KEYWORDS};

/// Which form of text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Framed article records; carries the record count.
    Articles(usize),
    /// Text of the main content area.
    MainContent,
    /// Text of the whole document.
    WholeDocument,
}

/// Text for the AI extractor and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredContent {
    pub text: String,
    pub source: ContentSource,
}

impl StructuredContent {
    /// Whether the text is plain fallback rather than article records.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        !matches!(self.source, ContentSource::Articles(_))
    }
}

/// Build the structured text of a page.
///
/// Works on a copy of the document with boilerplate removed when
/// `opts.strip_boilerplate` is set; the caller's document is untouched.
#[must_use]
pub fn structured_content(doc: &Document, page_url: &str, opts: &Options) -> StructuredContent {
    if opts.strip_boilerplate {
        let stripped = dom::clone_document(doc);
        dom::strip_boilerplate(&stripped);
        build(&stripped, page_url, opts)
    } else {
        build(doc, page_url, opts)
    }
}

fn build(doc: &Document, page_url: &str, opts: &Options) -> StructuredContent {
    let containers = locator::locate(doc, opts);
    debug!("Found {} total article elements", containers.len());

    let chain = FirstMatchChain::for_document(doc, opts);
    let records: Vec<String> = containers
        .iter()
        .filter_map(|container| record(container, page_url, &chain, opts))
        .collect();

    if !records.is_empty() {
        return StructuredContent {
            text: records.join("\n"),
            source: ContentSource::Articles(records.len()),
        };
    }

    let main_content = dom::document_elements(doc, "main[class], div[class]")
        .into_iter()
        .find(|el| dom::class_signals(el, MAIN_CONTENT_KEYWORDS));

    match main_content {
        Some(main) => StructuredContent {
            text: dom::collapsed_text(&main),
            source: ContentSource::MainContent,
        },
        None => StructuredContent {
            text: dom::collapsed_text(&doc.select("html")),
            source: ContentSource::WholeDocument,
        },
    }
}

/// One framed record, or `None` when the title is too short.
///
/// Placeholder titles are kept here; the AI can title those items.
fn record(container: &Container<'_>, page_url: &str, chain: &FirstMatchChain, opts: &Options) -> Option<String> {
    let fields = extractor::extract_fields(container, page_url, chain, &[], opts);
    if !opts.title_is_meaningful(&fields.title.text) {
        return None;
    }

    let title = patterns::collapse_whitespace(&fields.title.text);
    debug!("Found article: {} | Date: {}", patterns::truncate_chars(&title, 50), fields.date);

    let content = patterns::truncate_chars(&dom::collapsed_text(&container.element), opts.max_description_chars);

    Some(format!(
        "\nARTICLE {}:\nTITLE: {}\nLINK: {}\nDATE: {}\nIMAGE: {}\nCONTENT: {}\n---",
        container.ordinal, title, fields.link, fields.date, fields.image, content
    ))
}
