//! Page-level metadata.
//!
//! Recovers the feed title and description of a page independently of any
//! pattern descriptor, and discovers native RSS/Atom feeds the site already
//! publishes.

pub mod dom_extraction;
pub mod feeds;
pub mod meta_tags;

use dom_query::Document;
use serde::{Deserialize, Serialize};

pub use dom_extraction::{examine_title_element, extract_dom_title};
pub use feeds::native_feeds;
pub use meta_tags::examine_meta;

/// Title used when the page has neither `<title>` nor `<h1>`.
pub const DEFAULT_FEED_TITLE: &str = "Generated Feed";

/// Description used when the page has no description meta tag.
pub const DEFAULT_FEED_DESCRIPTION: &str = "Auto-generated RSS feed";

/// Feed title and description recovered from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PageMetadata {
    /// Title, or [`DEFAULT_FEED_TITLE`].
    #[must_use]
    pub fn title_or_default(&self) -> String {
        self.title.clone().unwrap_or_else(|| DEFAULT_FEED_TITLE.to_string())
    }

    /// Description, or [`DEFAULT_FEED_DESCRIPTION`].
    #[must_use]
    pub fn description_or_default(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| DEFAULT_FEED_DESCRIPTION.to_string())
    }
}

/// Extract page metadata.
///
/// 1. Meta tags (`description`, then `og:description`)
/// 2. DOM (`<title>`, then the first `<h1>`)
/// 3. Blank values dropped
#[must_use]
pub fn extract_metadata(doc: &Document) -> PageMetadata {
    let mut metadata = PageMetadata::default();

    metadata = meta_tags::examine_meta(doc, metadata);
    metadata = dom_extraction::extract_dom_title(doc, metadata);

    post_process_metadata(metadata)
}

/// Trim fields and drop the blank ones.
fn post_process_metadata(metadata: PageMetadata) -> PageMetadata {
    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    PageMetadata {
        title: clean(metadata.title),
        description: clean(metadata.description),
    }
}
