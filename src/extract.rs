//! Heuristic extraction.
//!
//! First-time extraction of a listing page with no stored descriptor: the
//! generic container locator, the first-match image chain and page metadata.

use crate::dom::{self, Document};
use crate::error::Result;
use crate::extractor;
use crate::image::FirstMatchChain;
use crate::locator;
use crate::metadata;
use crate::options::Options;
use crate::result::{ExtractedItem, FeedContent};

/// Main entry point for heuristic extraction of raw HTML bytes.
pub(crate) fn extract_content(html: &[u8], page_url: &str, options: &Options) -> Result<FeedContent> {
    let document = dom::parse_document(html)?;
    Ok(extract_feed(&document, page_url, options))
}

/// Items of every located container whose title survives the discard rule.
#[must_use]
pub fn extract_items(doc: &Document, page_url: &str, opts: &Options) -> Vec<ExtractedItem> {
    let chain = FirstMatchChain::for_document(doc, opts);

    let items: Vec<ExtractedItem> = locator::locate(doc, opts)
        .iter()
        .filter_map(|container| extractor::extract_fields(container, page_url, &chain, &[], opts).into_item(opts))
        .collect();

    tracing::debug!("Heuristic extraction produced {} items", items.len());
    items
}

/// Page metadata plus heuristic items.
#[must_use]
pub fn extract_feed(doc: &Document, page_url: &str, opts: &Options) -> FeedContent {
    let page = metadata::extract_metadata(doc);

    FeedContent {
        title: page.title_or_default(),
        description: page.description_or_default(),
        items: extract_items(doc, page_url, opts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const LISTING: &str = r#"<html><head>
        <title>Example Blog</title>
        <meta name="description" content="Posts about things">
    </head><body>
        <div class="post-card">
            <h2>First long title</h2>
            <a href="/posts/1">Read</a>
            <span class="post-date">March 3, 2023</span>
        </div>
        <div class="post-card">
            <h2>Tiny</h2>
            <a href="/posts/2">Read</a>
        </div>
        <div class="post-card"><p>untitled</p></div>
    </body></html>"#;

    #[test]
    fn test_extract_feed_applies_discard_rules() {
        let doc = dom::parse(LISTING);
        let feed = extract_feed(&doc, "https://example.com/blog", &Options::default());

        assert_eq!(feed.title, "Example Blog");
        assert_eq!(feed.description, "Posts about things");
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[0].link, "https://example.com/posts/1");
        assert_eq!(feed.items[0].pub_date, "2023-01-01");
        assert_eq!(feed.items[1].title, "Tiny");
    }

    #[test]
    fn test_defaults_without_metadata() {
        let doc = dom::parse("<body><p>nothing here</p></body>");
        let feed = extract_feed(&doc, "https://example.com", &Options::default());

        assert_eq!(feed.title, metadata::DEFAULT_FEED_TITLE);
        assert_eq!(feed.description, metadata::DEFAULT_FEED_DESCRIPTION);
        assert!(feed.is_empty());
    }

    #[test]
    fn test_extract_content_rejects_empty_input() {
        assert!(matches!(
            extract_content(b"", "https://example.com", &Options::default()),
            Err(Error::ParseError(_))
        ));
    }
}
