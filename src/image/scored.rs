//! Scored image candidates.
//!
//! Analysis side: [`score_images`] collects images from four categories
//! across the whole page and ranks them by category, class, parent and size
//! signals. The ranked list becomes the descriptor's `image_patterns`.
//!
//! Replay side: [`ScoredCandidateList`] tries those stored patterns against a
//! fresh container, highest priority first, and falls back to a
//! [`FirstMatchChain`] when none of them matches.

use std::collections::HashSet;

use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{img_source, is_plausible, FirstMatchChain, ImageCandidate, ImageSelector};
use crate::dom;
use crate::options::Options;
use crate::pattern::{ImageMatch, ImagePattern, PatternDescriptor};
use crate::patterns::{
    CONTENT_IMAGE_KEYWORDS, LEAD_IMAGE_KEYWORDS, PARENT_WRAPPER_KEYWORDS, SCORED_DECORATION_ALT,
    SCORED_DECORATION_SRC, SCORED_FEATURED_KEYWORDS, THUMB_IMAGE_KEYWORDS,
};

/// Category an image was collected under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    /// Inside a `div` whose class mentions `absolute`.
    Absolute,
    /// Own class signals a lead image.
    Featured,
    /// Own class signals article content.
    Content,
    /// Any image with a source.
    #[default]
    General,
    /// Unrecognized category from stored data.
    #[serde(other)]
    Other,
}

impl ImageCategory {
    /// Base score of the category.
    #[must_use]
    pub const fn base_score(self) -> i32 {
        match self {
            Self::Featured => 100,
            Self::Absolute => 90,
            Self::Content => 70,
            Self::General => 50,
            Self::Other => 0,
        }
    }
}

/// An image collected and scored during analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredImage {
    pub category: ImageCategory,
    pub classes: Vec<String>,
    pub src: String,
    pub alt: String,
    pub parent_classes: Vec<String>,
    pub parent_has_absolute: bool,
    pub parent_is_wrapper: bool,
    pub score: i32,
}

impl ScoredImage {
    fn from_element(img: &Selection<'_>, category: ImageCategory) -> Self {
        let parent_classes = dom::parent(img).map(|p| dom::class_list(&p)).unwrap_or_default();
        let parent_has_absolute = parent_classes
            .iter()
            .any(|c| c.to_lowercase().contains("absolute"));
        let parent_is_wrapper = dom::classes_signal(&parent_classes, PARENT_WRAPPER_KEYWORDS);

        let mut scored = Self {
            category,
            classes: dom::class_list(img),
            src: dom::attr(img, "src"),
            alt: dom::attr(img, "alt"),
            parent_classes,
            parent_has_absolute,
            parent_is_wrapper,
            score: 0,
        };
        scored.score = scored.compute_score(size_bonus(img));
        scored
    }

    fn compute_score(&self, size_bonus: i32) -> i32 {
        let mut score = self.category.base_score();

        if dom::classes_signal(&self.classes, LEAD_IMAGE_KEYWORDS) {
            score += 50;
        }
        if dom::classes_signal(&self.classes, THUMB_IMAGE_KEYWORDS) {
            score += 30;
        }
        if self.parent_has_absolute {
            score += 40;
        }
        if self.parent_is_wrapper {
            score += 20;
        }

        score + size_bonus
    }

    fn is_decoration(&self) -> bool {
        let src = self.src.to_lowercase();
        let alt = self.alt.to_lowercase();

        SCORED_DECORATION_SRC.iter().any(|kw| src.contains(kw))
            || SCORED_DECORATION_ALT.iter().any(|kw| alt.contains(kw))
    }
}

/// +30 when declared at least 200×200, +10 at least 100×100.
fn size_bonus(img: &Selection<'_>) -> i32 {
    match (dom::dimension(img, "width"), dom::dimension(img, "height")) {
        (Some(w), Some(h)) if w >= 200 && h >= 200 => 30,
        (Some(w), Some(h)) if w >= 100 && h >= 100 => 10,
        _ => 0,
    }
}

/// Collect and rank page images for the descriptor.
///
/// Takes the first `opts.image_candidates_per_category` images of each
/// category (absolute, featured, content, general), skips decoration, sorts
/// by descending score (stable) and keeps the top `opts.max_image_patterns`.
#[must_use]
pub fn score_images(doc: &Document, opts: &Options) -> Vec<ScoredImage> {
    let per_category = opts.image_candidates_per_category;

    let absolute: Vec<Selection<'_>> = dom::document_elements(doc, "div[class]")
        .iter()
        .filter(|div| dom::attr(div, "class").to_lowercase().contains("absolute"))
        .flat_map(|div| dom::elements(div, "img[src]"))
        .filter(has_src)
        .collect();

    let classed_imgs = dom::document_elements(doc, "img[class]");
    let featured = classed_imgs
        .iter()
        .filter(|img| has_src(img) && dom::class_signals(img, SCORED_FEATURED_KEYWORDS))
        .cloned();
    let content = classed_imgs
        .iter()
        .filter(|img| has_src(img) && dom::class_signals(img, CONTENT_IMAGE_KEYWORDS))
        .cloned();
    let general = dom::document_elements(doc, "img[src]").into_iter().filter(has_src);

    let categories = [
        (ImageCategory::Absolute, dedup(absolute, per_category)),
        (ImageCategory::Featured, dedup(featured, per_category)),
        (ImageCategory::Content, dedup(content, per_category)),
        (ImageCategory::General, dedup(general, per_category)),
    ];

    let mut scored: Vec<ScoredImage> = categories
        .iter()
        .flat_map(|(category, imgs)| imgs.iter().map(|img| ScoredImage::from_element(img, *category)))
        .filter(|image| !image.is_decoration())
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(opts.max_image_patterns);

    debug!("Scored {} image candidates", scored.len());
    scored
}

fn has_src(img: &Selection<'_>) -> bool {
    dom::has_value(img, "src")
}

fn dedup<'a, I>(imgs: I, limit: usize) -> Vec<Selection<'a>>
where
    I: IntoIterator<Item = Selection<'a>>,
{
    let mut seen = HashSet::new();
    imgs.into_iter()
        .filter(|img| dom::node_id(img).is_some_and(|id| seen.insert(id)))
        .take(limit)
        .collect()
}

/// Replay-time selector driven by stored, ranked image patterns.
#[derive(Debug, Clone)]
pub struct ScoredCandidateList {
    patterns: Vec<ImagePattern>,
    fallback: FirstMatchChain,
    min_dimension: u32,
}

impl ScoredCandidateList {
    /// Build from a descriptor's image patterns.
    ///
    /// Patterns without image or parent classes would match any `<img>` and
    /// are left to the fallback chain.
    #[must_use]
    pub fn new(descriptor: &PatternDescriptor, opts: &Options) -> Self {
        let patterns = descriptor
            .ranked_image_patterns()
            .into_iter()
            .filter(|pattern| pattern.match_rule() != ImageMatch::Any)
            .collect();
        Self {
            patterns,
            fallback: FirstMatchChain::for_replay(opts),
            min_dimension: opts.replay_min_image_dimension,
        }
    }

    fn pattern_source(&self, pattern: &ImagePattern, imgs: &[Selection<'_>]) -> Option<String> {
        let rule = pattern.match_rule();
        imgs.iter()
            .filter(|img| matches_rule(img, rule) && is_plausible(img, self.min_dimension))
            .find_map(img_source)
    }
}

impl ImageSelector for ScoredCandidateList {
    fn candidates(&self, container: &Selection<'_>) -> Vec<ImageCandidate> {
        let imgs = dom::elements(container, "img");

        let mut candidates: Vec<ImageCandidate> = self
            .patterns
            .iter()
            .filter_map(|pattern| {
                self.pattern_source(pattern, &imgs)
                    .map(|src| ImageCandidate::new("image-pattern", src, pattern.priority))
            })
            .collect();

        candidates.extend(self.fallback.candidates(container));
        candidates
    }
}

fn matches_rule(img: &Selection<'_>, rule: ImageMatch<'_>) -> bool {
    match rule {
        ImageMatch::Parent(classes) => dom::parent(img).is_some_and(|p| has_all_classes(&p, classes)),
        ImageMatch::Image(classes) => has_all_classes(img, classes),
        ImageMatch::Any => true,
    }
}

fn has_all_classes(el: &Selection<'_>, classes: &[String]) -> bool {
    let own = dom::class_list(el);
    classes.iter().all(|c| own.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn featured_image_outranks_general() {
        let doc = dom::parse(
            r#"
            <img src="/plain.jpg">
            <img class="hero-img" src="/hero.jpg" width="800" height="400">
        "#,
        );
        let scored = score_images(&doc, &Options::default());

        assert_eq!(scored[0].src, "/hero.jpg");
        assert_eq!(scored[0].category, ImageCategory::Featured);
        // featured 100 + lead class 50 + size 30
        assert_eq!(scored[0].score, 180);
    }

    #[test]
    fn parent_bonuses_apply() {
        let doc = dom::parse(
            r#"<div class="absolute top-0"><img src="/a.jpg"></div>
               <div class="media-wrapper"><img src="/w.jpg" width="150" height="150"></div>"#,
        );
        let scored = score_images(&doc, &Options::default());
        let score_of = |src: &str, category| {
            scored
                .iter()
                .find(|s| s.src == src && s.category == category)
                .map(|s| s.score)
        };

        // absolute 90 + parent absolute 40
        assert_eq!(score_of("/a.jpg", ImageCategory::Absolute), Some(130));
        // general 50 + wrapper 20 + size 10
        assert_eq!(score_of("/w.jpg", ImageCategory::General), Some(80));
    }

    #[test]
    fn decoration_is_skipped_and_list_is_capped() {
        let mut html = String::from(r#"<img src="/site-logo.png"><img src="/x.jpg" alt="Emoji">"#);
        for i in 0..20 {
            html.push_str(&format!(r#"<div class="absolute"><img class="featured content" src="/{i}.jpg"></div>"#));
        }
        let doc = dom::parse(&html);
        let scored = score_images(&doc, &Options::default());

        assert!(scored.len() <= 10);
        assert!(scored.iter().all(|s| !s.src.contains("logo") && s.alt != "Emoji"));
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
    }

    fn descriptor_with(patterns: Vec<ImagePattern>) -> PatternDescriptor {
        PatternDescriptor {
            image_patterns: patterns,
            ..PatternDescriptor::default()
        }
    }

    #[test]
    fn stored_patterns_are_tried_in_priority_order() {
        let doc = dom::parse(
            r#"<article>
                <img class="thumb" src="/thumb.jpg">
                <div class="absolute inset-0"><img src="/cover.jpg"></div>
            </article>"#,
        );
        let descriptor = descriptor_with(vec![
            ImagePattern {
                classes: vec!["thumb".to_string()],
                priority: 80,
                ..ImagePattern::default()
            },
            ImagePattern {
                parent_classes: vec!["absolute".to_string(), "inset-0".to_string()],
                parent_has_absolute: true,
                priority: 130,
                ..ImagePattern::default()
            },
        ]);
        let list = ScoredCandidateList::new(&descriptor, &Options::default());

        let picked = list.select(&doc.select("article"), "https://example.com");
        assert_eq!(picked, "https://example.com/cover.jpg");
    }

    #[test]
    fn falls_back_to_chain_when_no_pattern_matches() {
        let doc = dom::parse(r#"<article><div style="background-image: url(/bg.png)"></div></article>"#);
        let descriptor = descriptor_with(vec![ImagePattern {
            classes: vec!["gone".to_string()],
            priority: 150,
            ..ImagePattern::default()
        }]);
        let list = ScoredCandidateList::new(&descriptor, &Options::default());

        assert_eq!(list.select(&doc.select("article"), "https://example.com"), "https://example.com/bg.png");
    }

    #[test]
    fn pattern_matches_respect_plausibility() {
        let doc = dom::parse(
            r#"<article><img class="thumb" src="/small.jpg" width="60" height="60"><img class="thumb" src="/big.jpg"></article>"#,
        );
        let descriptor = descriptor_with(vec![ImagePattern {
            classes: vec!["thumb".to_string()],
            priority: 80,
            ..ImagePattern::default()
        }]);
        let list = ScoredCandidateList::new(&descriptor, &Options::default());

        let candidates = list.candidates(&doc.select("article"));
        assert_eq!(candidates[0].strategy, "image-pattern");
        assert_eq!(candidates[0].raw_src, "/big.jpg");
    }

    #[test]
    fn classless_patterns_leave_choice_to_chain() {
        let doc = dom::parse(
            r#"<article><img src="/generic.jpg"><img class="featured" src="/lead.jpg"></article>"#,
        );
        let descriptor = descriptor_with(vec![ImagePattern {
            selector: "img".to_string(),
            priority: 50,
            ..ImagePattern::default()
        }]);
        let list = ScoredCandidateList::new(&descriptor, &Options::default());

        let candidates = list.candidates(&doc.select("article"));
        assert!(candidates.iter().all(|c| c.strategy != "image-pattern"));
        assert_eq!(list.select(&doc.select("article"), "https://example.com"), "https://example.com/lead.jpg");
    }
}
