//! Configuration options for article extraction and pattern replay.
//!
//! The `Options` struct carries every limit and threshold the heuristics use,
//! so the keyword-driven code never hard-codes a number.

/// Configuration options for extraction, derivation and replay.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rssbridge::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     use_page_image: false,
///     precise_text_dates: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Maximum number of containers the generic locator returns.
    ///
    /// Default: `15`
    pub max_containers: usize,

    /// Maximum number of containers a replay turns into items.
    ///
    /// Default: `10`
    pub max_replay_items: usize,

    /// Maximum length of an item description, in characters.
    ///
    /// Default: `400`
    pub max_description_chars: usize,

    /// Minimum title length (characters, after trimming) for an item to be kept.
    ///
    /// Default: `4`
    pub min_title_chars: usize,

    /// Declared width/height below which the first-match chain skips an image.
    ///
    /// Default: `100`
    pub min_image_dimension: u32,

    /// Declared width/height below which the replay fallback skips an image.
    ///
    /// Replay tolerates slightly smaller thumbnails than first-time analysis.
    ///
    /// Default: `80`
    pub replay_min_image_dimension: u32,

    /// Number of ranked image patterns kept in a descriptor.
    ///
    /// Default: `10`
    pub max_image_patterns: usize,

    /// Images considered per scoring category when deriving image patterns.
    ///
    /// Default: `3`
    pub image_candidates_per_category: usize,

    /// Number of anchors recorded as link patterns.
    ///
    /// Default: `20`
    pub max_link_patterns: usize,

    /// Use the page-level `og:image` as the first image candidate.
    ///
    /// When enabled, every item of a page that declares `og:image` gets that
    /// image unless it is rejected by normalization.
    ///
    /// Default: `true`
    pub use_page_image: bool,

    /// Remove script/style/nav/footer/aside/form/button before building the
    /// structured text handed to the AI extractor.
    ///
    /// Default: `true`
    pub strip_boilerplate: bool,

    /// Parse full dates out of free text before falling back to the
    /// year-only heuristic.
    ///
    /// When disabled, free-text dates collapse to `YYYY-01-01`.
    ///
    /// Default: `false`
    pub precise_text_dates: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_containers: 15,
            max_replay_items: 10,
            max_description_chars: 400,
            min_title_chars: 4,
            min_image_dimension: 100,
            replay_min_image_dimension: 80,
            max_image_patterns: 10,
            image_candidates_per_category: 3,
            max_link_patterns: 20,
            use_page_image: true,
            strip_boilerplate: true,
            precise_text_dates: false,
        }
    }
}

impl Options {
    /// Whether a title (already trimmed) is long enough to keep.
    #[must_use]
    pub fn title_is_meaningful(&self, title: &str) -> bool {
        title.chars().count() >= self.min_title_chars
    }
}
