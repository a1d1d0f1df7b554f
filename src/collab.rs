//! Collaborator contracts.
//!
//! The engine itself never touches the network. Fetching HTML and calling an
//! AI model are delegated to implementations of [`HtmlFetcher`] and
//! [`AiExtractor`]. With the `fetch` feature, [`ReqwestFetcher`] provides a
//! blocking HTTP fetcher.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::result::FeedContent;

/// Fetches the raw HTML of a page.
pub trait HtmlFetcher {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::FetchError`] on transport failures and
    /// non-success HTTP statuses.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F: HtmlFetcher + ?Sized> HtmlFetcher for &F {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// Outcome of one AI extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiOutcome {
    Success(FeedContent),
    Failure { reason: String },
}

impl AiOutcome {
    /// Failure with a reason.
    #[must_use]
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure { reason: reason.into() }
    }

    /// Interpret a model's JSON reply.
    ///
    /// Markdown code fences around the JSON are tolerated. An object with an
    /// `error` key, malformed JSON, or a non-object reply is a failure.
    #[must_use]
    pub fn from_json(reply: &str) -> Self {
        let value: Value = match serde_json::from_str(strip_code_fence(reply)) {
            Ok(value) => value,
            Err(err) => return Self::failure(format!("Failed to parse AI response: {err}")),
        };

        let Value::Object(map) = &value else {
            return Self::failure("AI response is not a JSON object");
        };
        if let Some(error) = map.get("error") {
            let reason = error.as_str().map_or_else(|| error.to_string(), str::to_string);
            return Self::failure(reason);
        }

        match serde_json::from_value::<FeedContent>(value) {
            Ok(content) => Self::Success(content),
            Err(err) => Self::failure(format!("Unexpected AI response shape: {err}")),
        }
    }

    /// Convert to a result, mapping failures to [`Error::AiError`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AiError`] for [`AiOutcome::Failure`].
    pub fn into_result(self) -> Result<FeedContent> {
        match self {
            Self::Success(content) => Ok(content),
            Self::Failure { reason } => Err(Error::AiError(reason)),
        }
    }
}

fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let Some(body) = reply.strip_prefix("```") else {
        return reply;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Turns structured page text into feed content, usually via an AI model.
pub trait AiExtractor {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Extract feed content for `url` from the structured text of the page.
    fn extract(&self, url: &str, structured_text: &str) -> AiOutcome;
}

/// Try each extractor in order and return the first success.
///
/// # Errors
///
/// Returns [`Error::AiError`] with the last failure reason when every
/// extractor fails, or when none is configured.
pub fn extract_with_fallback(extractors: &[&dyn AiExtractor], url: &str, structured_text: &str) -> Result<FeedContent> {
    let mut last_reason = "no AI extractor configured".to_string();

    for extractor in extractors {
        info!("Trying AI provider {} for {url}", extractor.name());
        match extractor.extract(url, structured_text) {
            AiOutcome::Success(content) => {
                info!("AI provider {} returned {} items", extractor.name(), content.items.len());
                return Ok(content);
            }
            AiOutcome::Failure { reason } => {
                warn!("AI provider {} failed: {reason}", extractor.name());
                last_reason = reason;
            }
        }
    }

    Err(Error::AiError(last_reason))
}

#[cfg(feature = "fetch")]
pub use http::ReqwestFetcher;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use tracing::debug;

    use super::HtmlFetcher;
    use crate::error::{Error, Result};

    /// Browser-like user agent sent with every request.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    /// Blocking HTTP fetcher.
    #[derive(Debug, Clone)]
    pub struct ReqwestFetcher {
        client: Client,
    }

    impl ReqwestFetcher {
        /// Fetcher with a 10 second timeout.
        ///
        /// # Errors
        ///
        /// Returns [`Error::FetchError`] when the HTTP client cannot be built.
        pub fn new() -> Result<Self> {
            Self::with_timeout(Duration::from_secs(10))
        }

        /// Fetcher with a custom timeout.
        ///
        /// # Errors
        ///
        /// Returns [`Error::FetchError`] when the HTTP client cannot be built.
        pub fn with_timeout(timeout: Duration) -> Result<Self> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .map_err(|err| Error::FetchError {
                    url: String::new(),
                    reason: format!("cannot build HTTP client: {err}"),
                })?;

            Ok(Self { client })
        }
    }

    impl HtmlFetcher for ReqwestFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            let fetch_error = |reason: String| Error::FetchError {
                url: url.to_string(),
                reason,
            };

            debug!("Fetching {url}");
            let response = self.client.get(url).send().map_err(|err| fetch_error(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(fetch_error(format!("HTTP {status}")));
            }

            let body = response.bytes().map_err(|err| fetch_error(err.to_string()))?;
            Ok(body.to_vec())
        }
    }
}
