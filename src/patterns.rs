//! Compiled regex patterns and keyword sets shared by the heuristics.
//!
//! Every class-name heuristic in the crate goes through
//! [`crate::dom::class_signals`] with one of the keyword sets below, so the
//! lists live in one place and can be tested on their own.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Container Discovery
// =============================================================================

/// Class keywords marking a block element as an article container.
pub const CONTAINER_KEYWORDS: &[&str] = &["post", "article", "news", "entry", "item", "story", "blog"];

/// Class keywords marking a list item as an article container.
pub const LIST_ITEM_KEYWORDS: &[&str] = &["post", "article", "news", "entry", "item"];

/// Block-level tags eligible for class-based container discovery.
pub const BLOCK_TAGS: &[&str] = &["div", "section"];

/// Heading tags in precedence order.
pub const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Tags removed from the analysis copy before serialization.
pub const BOILERPLATE_TAGS: &[&str] = &["script", "style", "nav", "footer", "aside", "form", "button"];

// =============================================================================
// Field Extraction
// =============================================================================

/// Class keywords marking a date-bearing element.
pub const DATE_KEYWORDS: &[&str] = &["date", "time", "published", "created", "updated", "post-date"];

/// Class keywords marking an excerpt element.
pub const EXCERPT_KEYWORDS: &[&str] = &["excerpt", "summary", "description"];

/// Class keywords marking the main content area of a page.
pub const MAIN_CONTENT_KEYWORDS: &[&str] = &["content", "main", "body", "wrapper"];

// =============================================================================
// Image Heuristics
// =============================================================================

/// Class keywords of wrappers that use CSS positioning around a media slot.
pub const POSITIONING_KEYWORDS: &[&str] = &["absolute", "relative", "flex", "grid"];

/// Class keywords of an image that is the item's lead picture.
pub const FEATURED_KEYWORDS: &[&str] =
    &["featured", "thumbnail", "cover", "hero", "main", "banner", "primary"];

/// Named wrapper classes, tried in this order.
pub const WRAPPER_CLASSES: &[&str] =
    &["image-wrapper", "post-image", "article-image", "media", "visual", "wp-post-image"];

/// Substrings of `src`/`alt` that mark an image as decoration.
pub const DECORATION_KEYWORDS: &[&str] =
    &["icon", "logo", "avatar", "emoji", "spinner", "pixel", "1x1", "button"];

/// `data-*` attribute name fragments that may carry an image URL.
pub const DATA_IMAGE_ATTR_KEYWORDS: &[&str] = &["src", "image", "bg"];

// Scored candidate list (pattern derivation)

/// Featured-category keywords used when collecting scored candidates.
pub const SCORED_FEATURED_KEYWORDS: &[&str] =
    &["featured", "thumbnail", "cover", "hero", "main", "primary"];

/// Content-category keywords used when collecting scored candidates.
pub const CONTENT_IMAGE_KEYWORDS: &[&str] = &["content", "article", "post", "story"];

/// Image classes earning the large class bonus.
pub const LEAD_IMAGE_KEYWORDS: &[&str] = &["featured", "hero", "main"];

/// Image classes earning the small class bonus.
pub const THUMB_IMAGE_KEYWORDS: &[&str] = &["thumbnail", "cover"];

/// Parent classes that mark a wrapper role.
pub const PARENT_WRAPPER_KEYWORDS: &[&str] = &["wrapper", "container", "image", "media", "visual"];

/// `src`/`alt` substrings skipped by the scored collector.
pub const SCORED_DECORATION_SRC: &[&str] = &["icon", "logo", "avatar", "emoji", "spinner"];

/// `alt` substrings skipped by the scored collector.
pub const SCORED_DECORATION_ALT: &[&str] = &["icon", "logo", "avatar", "emoji"];

// =============================================================================
// Regexes
// =============================================================================

/// Matches a year token of the 2020s anywhere in free text.
pub static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"202[0-9]").expect("YEAR_TOKEN regex"));

/// Captures the URL of a `background-image: url(...)` declaration.
pub static BACKGROUND_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"background-image:\s*url\(\s*["']?([^"')]+?)["']?\s*\)"#)
        .expect("BACKGROUND_IMAGE_URL regex")
});

/// Matches a leading URL scheme such as `https:` or `mailto:`.
pub static URL_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").expect("URL_SCHEME regex"));

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Collapse every whitespace run to one space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

/// Truncate to at most `max` characters without splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
