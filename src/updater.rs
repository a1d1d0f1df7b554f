//! Feed update worker.
//!
//! Drives the two life-cycle passes of a generated feed:
//!
//! - **analysis**: fetch a page, serialize its containers for the AI
//!   extractors, take the first successful AI result and derive a
//!   [`PatternDescriptor`] from the unstripped page;
//! - **refresh**: replay each feed's stored descriptor against a fresh fetch,
//!   without AI.
//!
//! The fetcher and the configuration are injected at construction; the worker
//! keeps no other state.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::collab::{self, AiExtractor, HtmlFetcher};
use crate::dom;
use crate::error::{Error, Result};
use crate::metadata;
use crate::options::Options;
use crate::pattern::{self, PatternDescriptor};
use crate::replay;
use crate::result::FeedContent;
use crate::structured::{self, StructuredContent};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Extraction options for analysis and replay.
    pub options: Options,

    /// Pause between two feed fetches in [`FeedUpdater::refresh_all`].
    ///
    /// Default: 2 seconds
    pub delay: Duration,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            options: Options::default(),
            delay: Duration::from_secs(2),
        }
    }
}

/// A stored feed as the worker sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRecord {
    pub id: u64,
    pub url: String,
    /// Stored descriptor JSON, if the feed was analysed.
    pub patterns: Option<String>,
}

/// Result of a first-time analysis.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Items and page metadata returned by the AI extractor.
    pub content: FeedContent,
    /// Descriptor to store for later refreshes.
    pub descriptor: PatternDescriptor,
    /// RSS/Atom feeds the site already advertises.
    pub native_feeds: Vec<String>,
    /// Text that was handed to the AI extractor.
    pub structured: StructuredContent,
}

/// Outcome of refreshing one feed.
#[derive(Debug)]
pub struct FeedRefresh {
    pub feed_id: u64,
    pub url: String,
    pub outcome: Result<FeedContent>,
}

/// Feed update worker.
pub struct FeedUpdater<F: HtmlFetcher> {
    fetcher: F,
    config: UpdaterConfig,
}

impl<F: HtmlFetcher> FeedUpdater<F> {
    #[must_use]
    pub const fn new(fetcher: F, config: UpdaterConfig) -> Self {
        Self { fetcher, config }
    }

    #[must_use]
    pub const fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Analyse a page for the first time.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, [`Error::ParseError`] for unparsable
    /// pages, or [`Error::AiError`] when every extractor fails.
    pub fn analyze(&self, url: &str, extractors: &[&dyn AiExtractor]) -> Result<Analysis> {
        let opts = &self.config.options;

        let html = self.fetcher.fetch(url)?;
        let doc = dom::parse_document(&html)?;

        let native_feeds = metadata::native_feeds(&doc, url);
        let structured = structured::structured_content(&doc, url, opts);
        if structured.is_fallback() {
            info!("No article records found at {url}, sending page text to the AI extractor");
        }

        let content = collab::extract_with_fallback(extractors, url, &structured.text)?;
        let descriptor = pattern::derive(&doc, url, &content, opts);

        Ok(Analysis {
            content,
            descriptor,
            native_feeds,
            structured,
        })
    }

    /// Refresh one feed by replaying its stored descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPatterns`] when the feed has no stored
    /// descriptor, otherwise whatever the replay reports.
    pub fn refresh(&self, feed: &FeedRecord) -> Result<FeedContent> {
        let patterns = feed
            .patterns
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or(Error::MissingPatterns)?;

        replay::scrape_with_patterns(&self.fetcher, &feed.url, patterns, &self.config.options)
    }

    /// Refresh every feed in order, pausing between fetches.
    ///
    /// A failing feed is logged and reported; the batch continues.
    pub fn refresh_all(&self, feeds: &[FeedRecord]) -> Vec<FeedRefresh> {
        let mut results = Vec::with_capacity(feeds.len());

        for (i, feed) in feeds.iter().enumerate() {
            if i > 0 && !self.config.delay.is_zero() {
                thread::sleep(self.config.delay);
            }

            let outcome = self.refresh(feed);
            match &outcome {
                Ok(content) => info!("Updated feed {} with {} items", feed.id, content.items.len()),
                Err(err) => warn!("Error updating feed {}: {err}", feed.id),
            }

            results.push(FeedRefresh {
                feed_id: feed.id,
                url: feed.url.clone(),
                outcome,
            });
        }

        results
    }
}
