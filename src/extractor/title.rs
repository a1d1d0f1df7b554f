//! Title extraction.

use crate::dom;
use crate::locator::Container;
use crate::options::Options;
use crate::patterns::HEADING_TAGS;

use super::find_by_hint;

/// A container title, possibly a synthetic placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub text: String,
    /// True when no heading was found and `text` is `Article {n}`.
    pub synthetic: bool,
}

impl Title {
    fn found(text: String) -> Self {
        Self {
            text,
            synthetic: false,
        }
    }

    fn placeholder(ordinal: usize) -> Self {
        Self {
            text: format!("Article {ordinal}"),
            synthetic: true,
        }
    }

    /// Whether an item with this title may be emitted.
    #[must_use]
    pub fn is_usable(&self, opts: &Options) -> bool {
        !self.synthetic && opts.title_is_meaningful(&self.text)
    }
}

/// Extract the title of a container.
///
/// Stored hints win, then `h1` through `h6` in that order. Headings with no
/// text are skipped.
#[must_use]
pub fn extract(container: &Container<'_>, hints: &[String]) -> Title {
    let element = &container.element;

    let from_hints = hints
        .iter()
        .filter_map(|hint| find_by_hint(element, hint))
        .map(|el| dom::collapsed_text(&el))
        .find(|text| !text.is_empty());
    if let Some(text) = from_hints {
        return Title::found(text);
    }

    HEADING_TAGS
        .iter()
        .filter_map(|tag| dom::find_first(element, tag, |h| !dom::text(h).is_empty()))
        .map(|heading| dom::collapsed_text(&heading))
        .next()
        .map_or_else(|| Title::placeholder(container.ordinal), Title::found)
}
