//! Container Locator
//!
//! Finds the repeating "article" blocks of a listing page. Two entry points:
//!
//! - [`locate`]: the generic tag/class heuristic used on first analysis.
//! - [`locate_with_patterns`]: relocates containers whose shape matches a
//!   stored [`ArticlePattern`], falling back to [`locate`] when nothing on
//!   the fresh page matches.
//!
//! Both de-duplicate by node identity and keep first-seen order.

use std::collections::HashSet;

use dom_query::{Document, Selection};
use tracing::{debug, info};

use crate::dom;
use crate::options::Options;
use crate::pattern::ArticlePattern;
use crate::patterns::{BLOCK_TAGS, CONTAINER_KEYWORDS, LIST_ITEM_KEYWORDS};

/// A DOM subtree believed to represent one article or post.
#[derive(Clone)]
pub struct Container<'a> {
    /// The container element.
    pub element: Selection<'a>,
    /// Lowercase tag name.
    pub tag: String,
    /// Class tokens in attribute order, duplicates kept.
    pub classes: Vec<String>,
    /// 1-based position in the located list.
    pub ordinal: usize,
}

impl<'a> Container<'a> {
    /// Wrap an element, capturing its shape.
    #[must_use]
    pub fn new(element: Selection<'a>, ordinal: usize) -> Self {
        let tag = dom::tag(&element);
        let classes = dom::class_list(&element);
        Self {
            element,
            tag,
            classes,
            ordinal,
        }
    }
}

impl std::fmt::Debug for Container<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("tag", &self.tag)
            .field("classes", &self.classes)
            .field("ordinal", &self.ordinal)
            .finish_non_exhaustive()
    }
}

/// Locate article containers with the generic heuristic.
///
/// Discovery order:
/// 1. `<article>` elements and elements with `role="article"`
/// 2. block elements whose classes signal post/article/news/entry/item/story/blog
/// 3. list items whose classes signal post/article/news/entry/item
///
/// The union is de-duplicated and truncated to `opts.max_containers`. An
/// empty result is not an error.
#[must_use]
pub fn locate<'a>(doc: &'a Document, opts: &Options) -> Vec<Container<'a>> {
    let articles = dom::document_elements(doc, "article, [role='article']");
    debug!("Found {} <article> elements", articles.len());

    let blocks: Vec<Selection<'a>> = dom::document_elements(doc, "[class]")
        .into_iter()
        .filter(|el| BLOCK_TAGS.contains(&dom::tag(el).as_str()))
        .filter(|el| dom::class_signals(el, CONTAINER_KEYWORDS))
        .collect();
    debug!("Found {} article-like block elements", blocks.len());

    let list_items: Vec<Selection<'a>> = dom::document_elements(doc, "li[class]")
        .into_iter()
        .filter(|el| dom::class_signals(el, LIST_ITEM_KEYWORDS))
        .collect();
    debug!("Found {} article-like <li> elements", list_items.len());

    let candidates = articles.into_iter().chain(blocks).chain(list_items);
    let containers = dedup_containers(candidates, opts.max_containers);

    debug!("Located {} containers", containers.len());
    containers
}

/// Locate containers whose tag and classes match stored article patterns.
///
/// A pattern with classes matches elements of the same tag carrying at least
/// one of those class tokens. A class-less pattern matches every `<article>`
/// when its tag is `article`, otherwise only elements of that tag with
/// `role="article"`. When no pattern matches anything, the generic heuristic
/// runs instead.
#[must_use]
pub fn locate_with_patterns<'a>(
    doc: &'a Document,
    patterns: &[ArticlePattern],
    opts: &Options,
) -> Vec<Container<'a>> {
    let candidates: Vec<Selection<'a>> = patterns
        .iter()
        .flat_map(|pattern| matching_elements(doc, pattern))
        .collect();
    let containers = dedup_containers(candidates, usize::MAX);

    if containers.is_empty() {
        info!(
            "No containers matched {} stored article patterns, falling back to heuristics",
            patterns.len()
        );
        return locate(doc, opts);
    }

    debug!("Relocated {} containers from stored patterns", containers.len());
    containers
}

fn matching_elements<'a>(doc: &'a Document, pattern: &ArticlePattern) -> Vec<Selection<'a>> {
    let tag = pattern.tag.trim().to_ascii_lowercase();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Vec::new();
    }

    if pattern.classes.is_empty() {
        let css = if tag == "article" {
            tag
        } else {
            format!("{tag}[role='article']")
        };
        return dom::document_elements(doc, &css);
    }

    dom::document_elements(doc, &tag)
        .into_iter()
        .filter(|el| {
            dom::class_list(el)
                .iter()
                .any(|class| pattern.classes.iter().any(|c| c == class))
        })
        .collect()
}

fn dedup_containers<'a, I>(candidates: I, limit: usize) -> Vec<Container<'a>>
where
    I: IntoIterator<Item = Selection<'a>>,
{
    let mut seen = HashSet::new();
    let mut containers = Vec::new();

    for element in candidates {
        if containers.len() >= limit {
            break;
        }
        let Some(id) = dom::node_id(&element) else {
            continue;
        };
        if seen.insert(id) {
            containers.push(Container::new(element, containers.len() + 1));
        }
    }

    containers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(containers: &[Container]) -> Vec<String> {
        containers.iter().map(|c| c.tag.clone()).collect()
    }

    #[test]
    fn test_discovery_order_articles_then_blocks_then_list_items() {
        let doc = dom::parse(
            r#"
            <ul><li class="news-item"><h3>List</h3></li></ul>
            <div class="blog-card"><h2>Block</h2></div>
            <article><h2>Article</h2></article>
        "#,
        );
        let found = locate(&doc, &Options::default());

        assert_eq!(tags(&found), vec!["article", "div", "li"]);
        let ordinals: Vec<usize> = found.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn test_class_match_is_case_insensitive() {
        let doc = dom::parse(r#"<div class="FeaturedStory">x</div><section class="Entry">y</section>"#);
        let found = locate(&doc, &Options::default());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_no_duplicates_for_role_article_blocks() {
        let doc = dom::parse(r#"<div role="article" class="post">x</div>"#);
        let found = locate(&doc, &Options::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].classes, vec!["post"]);
    }

    #[test]
    fn test_spans_and_unrelated_lists_ignored() {
        let doc = dom::parse(r#"<span class="post">x</span><li class="story">y</li><li class="menu">z</li>"#);
        assert!(locate(&doc, &Options::default()).is_empty());
    }

    #[test]
    fn test_cap_applies() {
        let html: String = (0..50).map(|i| format!("<div class=\"post\">{i}</div>")).collect();
        let doc = dom::parse(&html);
        assert_eq!(locate(&doc, &Options::default()).len(), 15);
    }

    #[test]
    fn test_patterns_relocate_by_exact_class_token() {
        let doc = dom::parse(
            r#"
            <div class="card teaser">A</div>
            <div class="card-body">B</div>
            <div class="teaser">C</div>
        "#,
        );
        let patterns = vec![ArticlePattern::new("div", vec!["teaser".to_string()])];
        let found = locate_with_patterns(&doc, &patterns, &Options::default());

        assert_eq!(found.len(), 2);
        assert_eq!(dom::text(&found[0].element), "A");
        assert_eq!(dom::text(&found[1].element), "C");
    }

    #[test]
    fn test_patterns_fall_back_to_heuristics() {
        let doc = dom::parse(r#"<article><h2>Only article</h2></article>"#);
        let patterns = vec![ArticlePattern::new("div", vec!["gone".to_string()])];
        let found = locate_with_patterns(&doc, &patterns, &Options::default());

        assert_eq!(tags(&found), vec!["article"]);
    }

    #[test]
    fn test_classless_div_pattern_requires_article_role() {
        let doc = dom::parse(r#"<div>plain</div><div role="article">story</div>"#);
        let patterns = vec![ArticlePattern::new("div", Vec::new())];
        let found = locate_with_patterns(&doc, &patterns, &Options::default());

        assert_eq!(found.len(), 1);
        assert_eq!(dom::text(&found[0].element), "story");
    }

    #[test]
    fn test_unsafe_tag_patterns_are_ignored() {
        let doc = dom::parse(r#"<div class="post">x</div>"#);
        let patterns = vec![ArticlePattern::new("div > p", vec!["post".to_string()])];
        // Nothing matches the bogus tag, so the heuristic takes over
        let found = locate_with_patterns(&doc, &patterns, &Options::default());
        assert_eq!(tags(&found), vec!["div"]);
    }
}
