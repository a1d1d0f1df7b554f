//! Pattern descriptors.
//!
//! A [`PatternDescriptor`] is the stored "memory" of how one site's articles
//! were located and fielded. It is plain data: tags, class tokens, selector
//! strings and scores. Nothing in it is ever handed to the CSS engine on
//! replay; matching is structural (see [`ImagePattern::match_rule`]).
//!
//! The JSON shape is versionless. Every key is optional, `null` reads as an
//! empty value, unknown keys are ignored, and `article_patterns` entries may
//! be legacy strings such as `"div.post"`.
//!
//! [`derive`] builds a descriptor from a page.

pub mod derive;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dom;
use crate::error::{Error, Result};
pub use crate::image::scored::ImageCategory;
use crate::patterns::PARENT_WRAPPER_KEYWORDS;

pub use derive::derive;

/// Read `null` as the type's default.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Serializable extraction strategy for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternDescriptor {
    /// Origin of the analysed page.
    #[serde(deserialize_with = "nullable")]
    pub base_url: String,

    /// Container shapes, in discovery order.
    #[serde(deserialize_with = "nullable")]
    pub article_patterns: Vec<ArticlePattern>,

    /// Static field hint lists, recorded when the AI pass produced items.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "ContentSelectors::is_empty")]
    pub content_selectors: ContentSelectors,

    /// Ranked image patterns, highest priority first.
    #[serde(deserialize_with = "nullable")]
    pub image_patterns: Vec<ImagePattern>,

    #[serde(deserialize_with = "nullable")]
    pub date_patterns: Vec<DatePattern>,

    #[serde(deserialize_with = "nullable")]
    pub link_patterns: Vec<LinkPattern>,
}

impl PatternDescriptor {
    /// Load a stored descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] when the text is not JSON or not a
    /// JSON object of the expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidPattern(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty-printed JSON for storage.
    ///
    /// # Errors
    ///
    /// Serialization of this plain-data type does not fail in practice; the
    /// error is surfaced as [`Error::InvalidPattern`] for completeness.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Image patterns sorted by descending priority (stable).
    #[must_use]
    pub fn ranked_image_patterns(&self) -> Vec<ImagePattern> {
        let mut ranked = self.image_patterns.clone();
        ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
        ranked
    }

    /// Whether there is nothing to replay with.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.article_patterns.is_empty()
            && self.image_patterns.is_empty()
            && self.date_patterns.is_empty()
            && self.link_patterns.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// =============================================================================
// Article patterns
// =============================================================================

/// Tag and class shape of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementShape {
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
}

/// Shape of a link inside a container, with its raw `href`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkShape {
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
    pub href_pattern: String,
}

/// Shape of an image inside a container, with its raw `src`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageShape {
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
    pub src_pattern: String,
}

/// Shape signature of one article container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArticlePatternRepr")]
pub struct ArticlePattern {
    pub tag: String,
    pub classes: Vec<String>,
    pub title_selectors: Vec<ElementShape>,
    pub link_selectors: Vec<LinkShape>,
    pub image_selectors: Vec<ImageShape>,
}

impl ArticlePattern {
    /// Pattern with a shape and no field hints.
    #[must_use]
    pub fn new(tag: impl Into<String>, classes: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            classes,
            ..Self::default()
        }
    }

    /// Parse a legacy `tag.class1.class2` string. A missing tag means `div`.
    #[must_use]
    pub fn from_legacy(pattern: &str) -> Self {
        let mut parts = pattern.trim().split('.');
        let tag = parts
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("div")
            .to_ascii_lowercase();
        let classes = parts
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        Self::new(tag, classes)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArticlePatternRepr {
    Legacy(String),
    Full(ArticlePatternFields),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ArticlePatternFields {
    tag: Option<String>,
    #[serde(deserialize_with = "nullable")]
    classes: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    title_selectors: Vec<ElementShape>,
    #[serde(deserialize_with = "nullable")]
    link_selectors: Vec<LinkShape>,
    #[serde(deserialize_with = "nullable")]
    image_selectors: Vec<ImageShape>,
}

impl From<ArticlePatternRepr> for ArticlePattern {
    fn from(repr: ArticlePatternRepr) -> Self {
        match repr {
            ArticlePatternRepr::Legacy(pattern) => Self::from_legacy(&pattern),
            ArticlePatternRepr::Full(fields) => Self {
                tag: fields.tag.unwrap_or_else(|| "div".to_string()),
                classes: fields.classes,
                title_selectors: fields.title_selectors,
                link_selectors: fields.link_selectors,
                image_selectors: fields.image_selectors,
            },
        }
    }
}

// =============================================================================
// Content selectors
// =============================================================================

/// Static hint lists recorded alongside a successful AI pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSelectors {
    #[serde(deserialize_with = "nullable")]
    pub title_patterns: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub description_patterns: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub link_patterns: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub image_patterns: Vec<String>,
}

impl ContentSelectors {
    /// The hint lists written for pages where the AI found items.
    #[must_use]
    pub fn standard() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| (*s).to_string()).collect() };
        Self {
            title_patterns: owned(&["h1", "h2", "h3", ".title", ".headline", ".post-title"]),
            description_patterns: owned(&[".excerpt", ".summary", ".description", "p"]),
            link_patterns: owned(&["a[href]"]),
            image_patterns: owned(&["img[src]", ".featured-image img", ".post-image img"]),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title_patterns.is_empty()
            && self.description_patterns.is_empty()
            && self.link_patterns.is_empty()
            && self.image_patterns.is_empty()
    }
}

// =============================================================================
// Image patterns
// =============================================================================

/// One ranked image candidate recorded during analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePattern {
    pub category: ImageCategory,
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
    pub selector: String,
    pub priority: i32,
    pub src_type: String,
    pub src_pattern: String,
    pub alt_pattern: String,
    #[serde(deserialize_with = "nullable")]
    pub parent_classes: Vec<String>,
    pub parent_has_absolute: bool,
}

/// How an image pattern finds its `<img>` inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMatch<'p> {
    /// `<img>` whose parent carries all of these classes.
    Parent(&'p [String]),
    /// `<img>` carrying all of these classes.
    Image(&'p [String]),
    /// Any `<img>`.
    Any,
}

impl ImagePattern {
    /// Whether the recorded parent classes mark a wrapper role.
    #[must_use]
    pub fn parent_is_wrapper(&self) -> bool {
        dom::classes_signal(&self.parent_classes, PARENT_WRAPPER_KEYWORDS)
    }

    /// The structural rule equivalent to the recorded selector.
    ///
    /// Precedence: absolutely positioned parent, then the image's own
    /// classes, then a wrapper parent, then any image.
    #[must_use]
    pub fn match_rule(&self) -> ImageMatch<'_> {
        if self.parent_has_absolute && !self.parent_classes.is_empty() {
            ImageMatch::Parent(&self.parent_classes)
        } else if !self.classes.is_empty() {
            ImageMatch::Image(&self.classes)
        } else if !self.parent_classes.is_empty() && self.parent_is_wrapper() {
            ImageMatch::Parent(&self.parent_classes)
        } else {
            ImageMatch::Any
        }
    }

    /// CSS-style selector string for the match rule, for storage and display.
    #[must_use]
    pub fn selector_for_rule(rule: ImageMatch<'_>) -> String {
        match rule {
            ImageMatch::Parent(classes) => format!(".{} img", classes.join(".")),
            ImageMatch::Image(classes) => format!("img.{}", classes.join(".")),
            ImageMatch::Any => "img".to_string(),
        }
    }
}

// =============================================================================
// Date / link patterns
// =============================================================================

/// Structural hint for a date-bearing element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePattern {
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
    /// Raw `datetime` attribute of a `<time>` element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime_attr: Option<String>,
}

/// Structural hint for an anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPattern {
    #[serde(deserialize_with = "nullable")]
    pub classes: Vec<String>,
    /// `absolute` or `relative`.
    pub href_type: String,
    pub href_pattern: String,
}
