//! Pattern derivation.
//!
//! Generalizes one successful extraction into a [`PatternDescriptor`]: the
//! shape of every located container, ranked image patterns, and structural
//! date/link hints. Values are recorded only as hints; replay never copies
//! them into items.

use dom_query::{Document, Selection};
use tracing::info;

use super::{
    ArticlePattern, ContentSelectors, DatePattern, ElementShape, ImagePattern, ImageShape, LinkPattern,
    LinkShape, PatternDescriptor,
};
use crate::dom;
use crate::image::{score_images, ScoredImage};
use crate::locator::{self, Container};
use crate::options::Options;
use crate::patterns::{DATE_KEYWORDS, HEADING_TAGS};
use crate::result::FeedContent;
use crate::url_utils;

/// Derive a reusable descriptor from a page and its successful extraction.
///
/// `content` is the AI (or heuristic) result for the same page; static
/// content selectors are only recorded when it carries items.
#[must_use]
pub fn derive(doc: &Document, page_url: &str, content: &FeedContent, opts: &Options) -> PatternDescriptor {
    let article_patterns: Vec<ArticlePattern> = locator::locate(doc, opts)
        .iter()
        .map(article_pattern)
        .collect();

    let content_selectors = if content.items.is_empty() {
        ContentSelectors::default()
    } else {
        ContentSelectors::standard()
    };

    let image_patterns: Vec<ImagePattern> = score_images(doc, opts).into_iter().map(ImagePattern::from).collect();

    let descriptor = PatternDescriptor {
        base_url: url_utils::origin(page_url),
        article_patterns,
        content_selectors,
        image_patterns,
        date_patterns: date_patterns(doc),
        link_patterns: link_patterns(doc, opts.max_link_patterns),
    };

    info!(
        "Derived pattern descriptor for {}: {} article, {} image, {} date, {} link patterns",
        descriptor.base_url,
        descriptor.article_patterns.len(),
        descriptor.image_patterns.len(),
        descriptor.date_patterns.len(),
        descriptor.link_patterns.len()
    );
    descriptor
}

fn shape(el: &Selection<'_>) -> ElementShape {
    ElementShape {
        tag: dom::tag(el),
        classes: dom::class_list(el),
    }
}

fn article_pattern(container: &Container<'_>) -> ArticlePattern {
    let element = &container.element;

    let title_selectors = dom::elements(element, &HEADING_TAGS.join(", "))
        .iter()
        .map(shape)
        .collect();

    let link_selectors = dom::elements(element, "a[href]")
        .iter()
        .map(|a| LinkShape {
            tag: dom::tag(a),
            classes: dom::class_list(a),
            href_pattern: dom::attr(a, "href"),
        })
        .collect();

    let image_selectors = dom::elements(element, "img[src]")
        .iter()
        .map(|img| ImageShape {
            tag: dom::tag(img),
            classes: dom::class_list(img),
            src_pattern: dom::attr(img, "src"),
        })
        .collect();

    ArticlePattern {
        tag: container.tag.clone(),
        classes: container.classes.clone(),
        title_selectors,
        link_selectors,
        image_selectors,
    }
}

impl From<ScoredImage> for ImagePattern {
    fn from(image: ScoredImage) -> Self {
        let src_type = if url_utils::has_scheme(&image.src) || image.src.starts_with("//") {
            "absolute"
        } else {
            "relative"
        };

        let mut pattern = Self {
            category: image.category,
            classes: image.classes,
            selector: String::new(),
            priority: image.score,
            src_type: src_type.to_string(),
            src_pattern: image.src,
            alt_pattern: image.alt,
            parent_classes: image.parent_classes,
            parent_has_absolute: image.parent_has_absolute,
        };
        pattern.selector = Self::selector_for_rule(pattern.match_rule());
        pattern
    }
}

fn date_patterns(doc: &Document) -> Vec<DatePattern> {
    let times = dom::document_elements(doc, "time").into_iter().map(|time| DatePattern {
        tag: "time".to_string(),
        classes: dom::class_list(&time),
        datetime_attr: dom::get_attribute(&time, "datetime"),
    });

    let classed = dom::document_elements(doc, "[class]")
        .into_iter()
        .filter(|el| dom::class_signals(el, DATE_KEYWORDS))
        .map(|el| DatePattern::from(shape(&el)));

    times.chain(classed).collect()
}

impl From<ElementShape> for DatePattern {
    fn from(shape: ElementShape) -> Self {
        Self {
            tag: shape.tag,
            classes: shape.classes,
            datetime_attr: None,
        }
    }
}

fn link_patterns(doc: &Document, limit: usize) -> Vec<LinkPattern> {
    dom::document_elements(doc, "a[href]")
        .iter()
        .take(limit)
        .map(|a| {
            let href = dom::attr(a, "href");
            let href_type = if href.starts_with("http") { "absolute" } else { "relative" };
            LinkPattern {
                classes: dom::class_list(a),
                href_type: href_type.to_string(),
                href_pattern: href,
            }
        })
        .collect()
}
