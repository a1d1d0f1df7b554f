//! # rssbridge
//!
//! Turns arbitrary listing pages (blogs, news indexes, category pages) into
//! feed items.
//!
//! A page is analysed once: article containers are located with tag/class
//! heuristics, each container's fields are extracted, and the result is
//! serialized into framed text for an AI extractor. From the successful
//! result a [`PatternDescriptor`] is derived and stored. Later refreshes
//! replay that descriptor against fresh HTML with no AI involved.
//!
//! ## Quick Start
//!
//! ```rust
//! use rssbridge::extract;
//!
//! let html = r#"<html><head><title>My Blog</title></head><body>
//!   <article><h2>Hello world</h2><a href="/hello">Read</a></article>
//! </body></html>"#;
//!
//! let feed = extract(html.as_bytes(), "https://example.com/blog")?;
//! assert_eq!(feed.title, "My Blog");
//! assert_eq!(feed.items[0].link, "https://example.com/hello");
//! # Ok::<(), rssbridge::Error>(())
//! ```
//!
//! ## Replay
//!
//! ```rust
//! use rssbridge::{replay_html, Options};
//!
//! let patterns = r#"{"article_patterns": [{"tag": "div", "classes": ["card"]}]}"#;
//! let html = r#"<div class="card"><h3>Fresh item</h3><a href="/fresh">x</a></div>"#;
//!
//! let feed = replay_html(html.as_bytes(), patterns, "https://example.com", &Options::default())?;
//! assert_eq!(feed.items[0].title, "Fresh item");
//! # Ok::<(), rssbridge::Error>(())
//! ```
//!
//! ## Features
//!
//! - `fetch`: a blocking `reqwest` implementation of [`HtmlFetcher`]

mod error;
mod extract;
mod options;
mod result;

/// DOM operations over `dom_query`: parsing, class lists, `class_signals`.
pub mod dom;

/// Character encoding detection for the lenient parse path.
pub mod encoding;

/// Keyword sets and compiled regexes shared by every heuristic.
pub mod patterns;

/// URL resolution for links and images.
pub mod url_utils;

/// Article container discovery.
pub mod locator;

/// Per-container field extraction (title, link, date, description).
pub mod extractor;

/// Image selection strategies.
pub mod image;

/// Framed article text for the AI extractor.
pub mod structured;

/// Pattern descriptors and their derivation.
pub mod pattern;

/// Descriptor-driven extraction.
pub mod replay;

/// Page title/description and native feed discovery.
pub mod metadata;

/// Fetcher and AI extractor contracts.
pub mod collab;

/// Feed analysis and refresh worker.
pub mod updater;

// Public API - re-exports
pub use collab::{AiExtractor, AiOutcome, HtmlFetcher};
pub use error::{Error, Result};
pub use extract::{extract_feed, extract_items};
pub use options::Options;
pub use pattern::PatternDescriptor;
pub use replay::{replay, replay_html, scrape_with_patterns};
pub use result::{ExtractedItem, FeedContent};
pub use structured::{structured_content, StructuredContent};
pub use updater::{FeedUpdater, UpdaterConfig};

#[cfg(feature = "fetch")]
pub use collab::ReqwestFetcher;

/// Extracts feed items from raw HTML with the generic heuristics and default
/// options.
///
/// # Arguments
///
/// * `html` - The page as raw bytes; non-UTF-8 pages are decoded leniently
/// * `page_url` - URL the page was fetched from, used to resolve links
///
/// # Returns
///
/// Page title/description and every item whose title survived the discard
/// rule. A page without articles is `Ok` with no items; only unparsable
/// input is an error.
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &[u8], page_url: &str) -> Result<FeedContent> {
    extract_with_options(html, page_url, &Options::default())
}

/// Extracts feed items from raw HTML with custom options.
///
/// # Example
///
/// ```rust
/// use rssbridge::{extract_with_options, Options};
///
/// let html = b"<article><h2>Posted 2024</h2><time>June 5, 2024</time></article>";
/// let options = Options {
///     precise_text_dates: true,
///     ..Options::default()
/// };
/// let feed = extract_with_options(html, "https://example.com", &options)?;
/// assert_eq!(feed.items[0].pub_date, "2024-06-05");
/// # Ok::<(), rssbridge::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &[u8], page_url: &str, options: &Options) -> Result<FeedContent> {
    extract::extract_content(html, page_url, options)
}

/// Derives a pattern descriptor from a page and the feed content an AI
/// extractor returned for it.
///
/// # Example
///
/// ```rust
/// use rssbridge::{derive_patterns, FeedContent, Options};
///
/// let html = br#"<div class="post"><h2>Some title</h2></div>"#;
/// let descriptor = derive_patterns(html, "https://example.com/x", &FeedContent::default(), &Options::default())?;
/// assert_eq!(descriptor.base_url, "https://example.com");
/// assert_eq!(descriptor.article_patterns.len(), 1);
/// # Ok::<(), rssbridge::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn derive_patterns(
    html: &[u8],
    page_url: &str,
    content: &FeedContent,
    options: &Options,
) -> Result<PatternDescriptor> {
    let document = dom::parse_document(html)?;
    Ok(pattern::derive(&document, page_url, content, options))
}
