//! Pattern Replay Engine
//!
//! Reproduces the items of a previously analysed page from its stored
//! [`PatternDescriptor`] alone, with no AI involvement. Containers are
//! relocated by shape, fields go through the same extractors as first-time
//! analysis, and images consult the descriptor's ranked image patterns
//! before the generic chain.
//!
//! Page title and description never depend on the descriptor.

use dom_query::Document;
use tracing::{debug, info};

use crate::collab::HtmlFetcher;
use crate::dom;
use crate::error::Result;
use crate::extractor;
use crate::image::ScoredCandidateList;
use crate::locator;
use crate::metadata;
use crate::options::Options;
use crate::pattern::PatternDescriptor;
use crate::result::{ExtractedItem, FeedContent};

/// Replay a descriptor against a parsed document.
///
/// At most `opts.max_replay_items` containers are examined. Items with a
/// placeholder or too-short title are dropped. An empty item list is a
/// valid outcome.
#[must_use]
pub fn replay(doc: &Document, descriptor: &PatternDescriptor, page_url: &str, opts: &Options) -> FeedContent {
    let containers = locator::locate_with_patterns(doc, &descriptor.article_patterns, opts);
    debug!("Replay located {} containers", containers.len());

    let images = ScoredCandidateList::new(descriptor, opts);
    let title_hints = title_hints(descriptor);

    let items: Vec<ExtractedItem> = containers
        .iter()
        .take(opts.max_replay_items)
        .filter_map(|container| {
            extractor::extract_fields(container, page_url, &images, &title_hints, opts).into_item(opts)
        })
        .collect();

    let page = metadata::extract_metadata(doc);
    info!("Replay extracted {} items from {page_url}", items.len());

    FeedContent {
        title: page.title_or_default(),
        description: page.description_or_default(),
        items,
    }
}

/// Title hints from the stored content selectors, duplicates dropped.
///
/// Per-pattern heading shapes are recorded in document order, so they are
/// not used as hints; the `h1`..`h6` precedence of the extractor applies.
fn title_hints(descriptor: &PatternDescriptor) -> Vec<String> {
    let mut hints: Vec<String> = Vec::new();
    for hint in &descriptor.content_selectors.title_patterns {
        if !hint.is_empty() && !hints.contains(hint) {
            hints.push(hint.clone());
        }
    }
    hints
}

/// Replay a stored descriptor (JSON) against raw HTML.
///
/// The descriptor is validated before the page is parsed.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) when the
/// descriptor is not a JSON object and
/// [`Error::ParseError`](crate::Error::ParseError) when the page cannot be
/// parsed.
pub fn replay_html(html: &[u8], patterns_json: &str, page_url: &str, opts: &Options) -> Result<FeedContent> {
    let descriptor = PatternDescriptor::from_json(patterns_json)?;
    let doc = dom::parse_document(html)?;
    Ok(replay(&doc, &descriptor, page_url, opts))
}

/// Fetch `url` and replay a stored descriptor against it.
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) before any
/// fetch when the descriptor is invalid, then whatever the fetcher or the
/// parser reports.
pub fn scrape_with_patterns(
    fetcher: &dyn HtmlFetcher,
    url: &str,
    patterns_json: &str,
    opts: &Options,
) -> Result<FeedContent> {
    let descriptor = PatternDescriptor::from_json(patterns_json)?;
    let html = fetcher.fetch(url)?;
    let doc = dom::parse_document(&html)?;
    Ok(replay(&doc, &descriptor, url, opts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pattern::{ArticlePattern, ElementShape};

    const PAGE: &str = "https://news.example.org/latest";

    fn card(n: usize) -> String {
        format!(
            r#"<div class="story-card"><h3>Headline number {n}</h3><a href="/s/{n}">go</a></div>"#
        )
    }

    #[test]
    fn test_replay_caps_items() {
        let html: String = (1..=25).map(card).collect();
        let doc = dom::parse(&html);
        let descriptor = PatternDescriptor {
            article_patterns: vec![ArticlePattern::new("div", vec!["story-card".to_string()])],
            ..PatternDescriptor::default()
        };

        let feed = replay(&doc, &descriptor, PAGE, &Options::default());
        assert_eq!(feed.items.len(), 10);
        assert_eq!(feed.items[0].link, "https://news.example.org/s/1");
    }

    #[test]
    fn test_title_hints_come_from_content_selectors() {
        let mut pattern = ArticlePattern::new("div", vec!["story-card".to_string()]);
        pattern.title_selectors = vec![ElementShape {
            tag: "span".to_string(),
            classes: vec!["headline".to_string()],
        }];
        let mut descriptor = PatternDescriptor {
            article_patterns: vec![pattern],
            ..PatternDescriptor::default()
        };
        descriptor.content_selectors.title_patterns =
            vec!["h2".to_string(), String::new(), "h2".to_string(), ".title".to_string()];

        assert_eq!(title_hints(&descriptor), vec!["h2", ".title"]);
    }

    #[test]
    fn test_kicker_heading_does_not_replace_title() {
        let html = r#"<div class="post"><h4 class="kicker">Opinion</h4><h2>Real headline one</h2><a href="/p/1">x</a></div>"#;
        let doc = dom::parse(html);
        let mut pattern = ArticlePattern::new("div", vec!["post".to_string()]);
        pattern.title_selectors = vec![
            ElementShape {
                tag: "h4".to_string(),
                classes: vec!["kicker".to_string()],
            },
            ElementShape {
                tag: "h2".to_string(),
                classes: Vec::new(),
            },
        ];
        let descriptor = PatternDescriptor {
            article_patterns: vec![pattern],
            ..PatternDescriptor::default()
        };

        let feed = replay(&doc, &descriptor, PAGE, &Options::default());
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].title, "Real headline one");
    }

    #[test]
    fn test_replay_html_validates_descriptor_first() {
        assert!(matches!(
            replay_html(b"", "[]", PAGE, &Options::default()),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(
            replay_html(b"", "{}", PAGE, &Options::default()),
            Err(Error::ParseError(_))
        ));
    }
}
