//! Result types for extraction output.
//!
//! `ExtractedItem` is the per-container unit; `FeedContent` is the page-level
//! result produced either by the AI collaborator or by pattern replay. Both
//! serialize with the field names the feed store and the AI prompt use.

use serde::{Deserialize, Serialize};

/// One article-like item extracted from a page.
///
/// Empty strings mean "no value"; consumers must not invent one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Item headline.
    #[serde(default)]
    pub title: String,

    /// Absolute URL of the item, or empty.
    #[serde(default)]
    pub link: String,

    /// Short description, at most `Options::max_description_chars` characters.
    #[serde(default)]
    pub description: String,

    /// Absolute image URL, or empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// ISO date (`YYYY-MM-DD`), or empty.
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
}

/// Page-level extraction result: feed title, description and items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedContent {
    /// Feed title.
    #[serde(default)]
    pub title: String,

    /// Feed description.
    #[serde(default)]
    pub description: String,

    /// Extracted items. Empty is a valid outcome.
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
}

impl FeedContent {
    /// Whether the page produced no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
