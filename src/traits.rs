//! Trait definitions for the transport seam and the two query areas.
//!
//! `Transport` is the single capability the engine needs from the outside world:
//! given a URL, return the response body as text. Everything else (URI building,
//! parsing, paging) is layered on top of it, which keeps the engine testable
//! against scripted responses.
//!
//! `FeedOperations` and `IndexOperations` group the public queries by data source,
//! mirroring the two wire formats: the paginated atom browse feed and the bulk
//! index files.

use super::error::Result;
use super::filing::Filing;
#[cfg(feature = "index")]
use super::index::{EdgarDay, EdgarPeriod};
#[cfg(feature = "feeds")]
use super::options::FeedOptions;
use async_trait::async_trait;

/// Fetches a resource by URL and returns its body as text.
///
/// Implementations report network failures and non-success statuses as errors.
/// Callers never inspect status codes; a failed fetch is opaque to the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Queries against the atom browse feed.
///
/// Both paging entry points share one page primitive: `recent` streams filings
/// into a sink, `find` collects them.
#[cfg(feature = "feeds")]
#[async_trait]
pub trait FeedOperations {
    /// Streams current filings into `sink`, in feed order, until `limit` filings
    /// were delivered or the feed runs out. Returns the number delivered.
    async fn recent<F>(&self, options: FeedOptions, sink: F) -> Result<usize>
    where
        F: FnMut(Filing) -> Result<()> + Send;
    /// Collects filings of a single registrant across pages.
    async fn find(&self, cik: &str, options: FeedOptions) -> Result<Vec<Filing>>;
    /// Fetches and parses a single page of the current filings feed.
    async fn recent_page(&self, options: &FeedOptions) -> Result<Vec<Filing>>;
    /// Fetches and parses a single page of a registrant's filings feed.
    async fn company_page(&self, cik: &str, options: &FeedOptions) -> Result<Vec<Filing>>;
}

/// Retrieval of the bulk form index files.
///
/// The registry publishes a form index per business day and per quarter under a
/// fixed path convention; these operations download and parse them.
#[cfg(feature = "index")]
#[async_trait]
pub trait IndexOperations {
    /// Fetches and parses the form index for a single day.
    async fn daily_filings(&self, day: EdgarDay) -> Result<Vec<Filing>>;
    /// Fetches and parses the quarterly form index.
    async fn period_filings(&self, period: EdgarPeriod) -> Result<Vec<Filing>>;
}
