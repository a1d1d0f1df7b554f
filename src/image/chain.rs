//! First-match image strategy chain.

use dom_query::{Document, Selection};

use super::{img_source, is_plausible, ImageCandidate, ImageSelector};
use crate::dom;
use crate::options::Options;
use crate::patterns::{
    BACKGROUND_IMAGE_URL, DATA_IMAGE_ATTR_KEYWORDS, FEATURED_KEYWORDS, POSITIONING_KEYWORDS,
    WRAPPER_CLASSES,
};
use crate::url_utils;

/// Strategies in priority order. The index sets the candidate priority.
const STRATEGIES: &[&str] = &[
    "og:image",
    "positioned",
    "featured",
    "wrapper",
    "picture",
    "first-plausible",
    "background-image",
    "data-attribute",
];

/// Fixed-priority image strategy chain.
///
/// Order: page `og:image` → image inside a positioning wrapper → featured
/// image (largest `srcset` entry) → named wrapper classes → `<picture>` →
/// first plausible `<img>` → inline `background-image` → image-like `data-*`
/// attribute.
#[derive(Debug, Clone, Default)]
pub struct FirstMatchChain {
    page_image: Option<String>,
    min_dimension: u32,
}

impl FirstMatchChain {
    /// Chain for first analysis of a page.
    ///
    /// Reads `og:image` once when `opts.use_page_image` is set, and uses
    /// `opts.min_image_dimension` as the size threshold.
    #[must_use]
    pub fn for_document(doc: &Document, opts: &Options) -> Self {
        let page_image = if opts.use_page_image {
            page_image(doc)
        } else {
            None
        };

        Self {
            page_image,
            min_dimension: opts.min_image_dimension,
        }
    }

    /// Chain used as the replay fallback: no page image, replay threshold.
    #[must_use]
    pub fn for_replay(opts: &Options) -> Self {
        Self {
            page_image: None,
            min_dimension: opts.replay_min_image_dimension,
        }
    }

    fn candidate(rank: usize, raw_src: String) -> ImageCandidate {
        let priority = i32::try_from(STRATEGIES.len() - rank).unwrap_or_default();
        ImageCandidate::new(STRATEGIES[rank], raw_src, priority)
    }

    fn strategy(&self, rank: usize, container: &Selection<'_>) -> Option<String> {
        match rank {
            0 => self.page_image.clone(),
            1 => positioned(container),
            2 => featured(container),
            3 => wrapper(container),
            4 => picture(container),
            5 => first_plausible(container, self.min_dimension),
            6 => background_image(container),
            7 => data_attribute(container),
            _ => None,
        }
    }
}

impl ImageSelector for FirstMatchChain {
    fn candidates(&self, container: &Selection<'_>) -> Vec<ImageCandidate> {
        (0..STRATEGIES.len())
            .filter_map(|rank| {
                self.strategy(rank, container)
                    .filter(|src| !src.trim().is_empty())
                    .map(|src| Self::candidate(rank, src))
            })
            .collect()
    }
}

/// `content` of the page's `og:image` meta tag.
#[must_use]
pub fn page_image(doc: &Document) -> Option<String> {
    dom::document_elements(doc, "meta[property='og:image']")
        .iter()
        .map(|meta| dom::attr(meta, "content"))
        .find(|content| !content.is_empty())
}

fn src_in(el: &Selection<'_>) -> Option<String> {
    dom::find_first(el, "img[src]", |img| dom::has_value(img, "src")).map(|img| dom::attr(&img, "src"))
}

fn positioned(container: &Selection<'_>) -> Option<String> {
    dom::elements(container, "[class]")
        .iter()
        .filter(|el| dom::class_signals(el, POSITIONING_KEYWORDS))
        .find_map(src_in)
}

fn featured(container: &Selection<'_>) -> Option<String> {
    let img = dom::find_first(container, "img[class]", |img| dom::class_signals(img, FEATURED_KEYWORDS))?;
    url_utils::srcset_last(&dom::attr(&img, "srcset")).or_else(|| img_source(&img))
}

fn wrapper(container: &Selection<'_>) -> Option<String> {
    let classed = dom::elements(container, "[class]");

    WRAPPER_CLASSES.iter().find_map(|wrapper_class| {
        let wrapper = classed.iter().find(|el| dom::classes_signal(dom::class_list(el), &[*wrapper_class]))?;
        if dom::tag(wrapper) == "img" {
            img_source(wrapper)
        } else {
            src_in(wrapper)
        }
    })
}

fn picture(container: &Selection<'_>) -> Option<String> {
    let picture = dom::first(container, "picture")?;

    dom::find_first(&picture, "source[srcset]", |s| dom::has_value(s, "srcset"))
        .and_then(|source| url_utils::srcset_first(&dom::attr(&source, "srcset")))
        .or_else(|| src_in(&picture))
}

fn first_plausible(container: &Selection<'_>, min_dimension: u32) -> Option<String> {
    dom::find_first(container, "img[src]", |img| {
        dom::has_value(img, "src") && is_plausible(img, min_dimension)
    })
    .map(|img| dom::attr(&img, "src"))
}

fn background_image(container: &Selection<'_>) -> Option<String> {
    dom::elements(container, "[style]").iter().find_map(|el| {
        BACKGROUND_IMAGE_URL
            .captures(&dom::attr(el, "style"))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

fn data_attribute(container: &Selection<'_>) -> Option<String> {
    dom::elements(container, "*").iter().find_map(|el| {
        dom::get_all_attributes(el).into_iter().find_map(|(name, value)| {
            let name = name.to_lowercase();
            let key = name.strip_prefix("data-")?;
            let value = value.trim();
            let looks_like_path = value.starts_with("http") || value.starts_with('/') || value.starts_with('.');

            (DATA_IMAGE_ATTR_KEYWORDS.iter().any(|kw| key.contains(kw)) && looks_like_path)
                .then(|| value.to_string())
        })
    })
}
