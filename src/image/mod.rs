//! Image selection.
//!
//! Two strategies share the [`ImageSelector`] capability:
//!
//! - [`FirstMatchChain`]: fixed priority chain used on first analysis. Within
//!   a strategy the first match wins; strategies are tried in order and the
//!   first candidate that survives normalization is the answer.
//! - [`ScoredCandidateList`]: used on replay. Tries the ranked image patterns
//!   stored in a descriptor, highest score first, then falls back to a chain.
//!
//! Both collect [`ImageCandidate`]s and share the plausibility filter and the
//! URL normalization in [`crate::url_utils::normalize_image`].

pub mod chain;
pub mod scored;

use dom_query::Selection;
use tracing::debug;

use crate::dom;
use crate::patterns::DECORATION_KEYWORDS;
use crate::url_utils;

pub use chain::FirstMatchChain;
pub use scored::{score_images, ScoredCandidateList, ScoredImage};

/// A provisional image source considered for one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Name of the strategy that produced the candidate.
    pub strategy: &'static str,
    /// Source exactly as found in the markup.
    pub raw_src: String,
    /// Higher is tried first.
    pub priority: i32,
}

impl ImageCandidate {
    #[must_use]
    pub fn new(strategy: &'static str, raw_src: impl Into<String>, priority: i32) -> Self {
        Self {
            strategy,
            raw_src: raw_src.into(),
            priority,
        }
    }
}

/// Picks the image URL of one container.
pub trait ImageSelector {
    /// Candidates for a container, best first.
    fn candidates(&self, container: &Selection<'_>) -> Vec<ImageCandidate>;

    /// First candidate that normalizes to a usable URL, or an empty string.
    fn select(&self, container: &Selection<'_>, page_url: &str) -> String {
        for candidate in self.candidates(container) {
            let url = url_utils::normalize_image(&candidate.raw_src, page_url);
            if url.is_empty() {
                debug!("Rejected {} image candidate {:?}", candidate.strategy, candidate.raw_src);
                continue;
            }
            debug!("Selected image via strategy: {}", candidate.strategy);
            return url;
        }
        String::new()
    }
}

/// Whether an `<img>` looks like content rather than decoration.
///
/// Rejects decoration keywords in `src` or `alt`, and declared dimensions
/// below `min_dimension` on either axis. Unparseable dimensions are ignored.
#[must_use]
pub fn is_plausible(img: &Selection<'_>, min_dimension: u32) -> bool {
    let src = dom::attr(img, "src").to_lowercase();
    let alt = dom::attr(img, "alt").to_lowercase();

    if DECORATION_KEYWORDS
        .iter()
        .any(|kw| src.contains(kw) || alt.contains(kw))
    {
        return false;
    }

    ["width", "height"]
        .iter()
        .filter_map(|axis| dom::dimension(img, axis))
        .all(|px| px >= min_dimension)
}

/// Source of an `<img>`: `src`, else the last `srcset` entry.
#[must_use]
pub fn img_source(img: &Selection<'_>) -> Option<String> {
    let src = dom::attr(img, "src");
    if !src.is_empty() {
        return Some(src);
    }
    url_utils::srcset_last(&dom::attr(img, "srcset"))
}
