//! Native feed discovery.

use dom_query::Document;
use tracing::info;

use crate::dom;
use crate::url_utils;

/// MIME types of feed `<link>` elements.
const FEED_TYPES: &[&str] = &["application/rss+xml", "application/atom+xml"];

/// URLs of RSS/Atom feeds advertised by `<link>` elements, resolved against
/// the page URL, without duplicates.
#[must_use]
pub fn native_feeds(doc: &Document, page_url: &str) -> Vec<String> {
    let mut feeds: Vec<String> = Vec::new();

    for link in dom::document_elements(doc, "link[type][href]") {
        let link_type = dom::attr(&link, "type").to_lowercase();
        if !FEED_TYPES.contains(&link_type.as_str()) {
            continue;
        }

        let url = url_utils::resolve_link(&dom::attr(&link, "href"), page_url);
        if !url.is_empty() && !feeds.contains(&url) {
            feeds.push(url);
        }
    }

    if !feeds.is_empty() {
        info!("Found {} native feeds at {page_url}", feeds.len());
    }
    feeds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovers_rss_and_atom() {
        let doc = dom::parse(
            r#"<head>
                <link rel="alternate" type="application/rss+xml" href="/feed.xml">
                <link rel="alternate" type="Application/Atom+XML" href="https://example.com/atom">
                <link rel="alternate" type="application/rss+xml" href="/feed.xml">
                <link rel="stylesheet" type="text/css" href="/style.css">
            </head>"#,
        );
        let feeds = native_feeds(&doc, "https://example.com/blog");

        assert_eq!(feeds, vec!["https://example.com/feed.xml", "https://example.com/atom"]);
    }

    #[test]
    fn test_no_feeds() {
        let doc = dom::parse("<head><title>x</title></head>");
        assert!(native_feeds(&doc, "https://example.com").is_empty());
    }
}
