//! Error types for rssbridge.
//!
//! Only whole-document or whole-feed failures are errors. A field that cannot
//! be found resolves to an empty value, and a page without articles is an
//! empty (successful) item list.

/// Error type for extraction, replay and feed-update operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page could not be fetched. Raised by `HtmlFetcher` implementations.
    #[error("Failed to fetch {url}: {reason}")]
    FetchError {
        /// URL that was requested.
        url: String,
        /// Transport or HTTP status description.
        reason: String,
    },

    /// The input could not be turned into a document by either parser path.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// A stored pattern descriptor is not valid structured data.
    #[error("Invalid extraction patterns: {0}")]
    InvalidPattern(String),

    /// Every configured AI extractor failed; carries the last failure reason.
    #[error("AI extraction failed: {0}")]
    AiError(String),

    /// A replay was requested for a feed that has no stored descriptor.
    #[error("No extraction patterns stored for this feed")]
    MissingPatterns,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

/// Result type alias for rssbridge operations.
pub type Result<T> = std::result::Result<T, Error>;
