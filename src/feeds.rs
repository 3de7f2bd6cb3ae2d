//! Paginated queries against the `browse-edgar` atom feed.
//!
//! The registry serves filings in pages of `count` entries starting at `start`.
//! [`pages`] is the single paging primitive: a lazy, finite stream that builds the
//! URI for the current offset, fetches it, parses it, and advances `start` by
//! `count`. It ends after the first page holding fewer than `count` entries (that
//! page is still yielded) or after an empty page. The registry is assumed never to
//! return a short page in the middle of a result set.
//!
//! `recent` drains the stream into a caller-supplied sink and `find` collects it,
//! both stopping early once an optional `limit` is reached.
//!
//! # Examples
//!
//! ```ignore
//! use secquery::{Edgar, FeedOperations, FeedOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let edgar = Edgar::new("MyApp contact@example.com")?;
//!
//!     // Stream the ten most recent filings.
//!     let opts = FeedOptions::new().with_start(0).with_count(10).with_limit(10);
//!     edgar
//!         .recent(opts, |filing| {
//!             println!("{} {} {}", filing.date, filing.term, filing.cik);
//!             Ok(())
//!         })
//!         .await?;
//!
//!     // Collect a registrant's annual reports.
//!     let opts = FeedOptions::new().with_form_type("10-K");
//!     let annual = edgar.find("0000320193", opts).await?;
//!     println!("{} annual reports", annual.len());
//!     Ok(())
//! }
//! ```

use super::Edgar;
use super::error::Result;
use super::filing::Filing;
use super::options::{COUNT, FeedOptions, START};
use super::parsing::atom::parse_entries;
use super::traits::{FeedOperations, Transport};
use super::uri::{DEFAULT_COUNT, DEFAULT_START, uri_for_cik, uri_for_recent};
use async_trait::async_trait;
use futures_util::stream::{self, Stream, TryStreamExt};

// Registrant listings page in smaller batches than the current-filings feed.
const FIND_COUNT: usize = 40;

/// Which feed a page request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// The "current filings" listing across all registrants.
    Recent,
    /// A single registrant's filings.
    Company(String),
}

/// Everything needed to request consecutive pages of one feed.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Base URL of the browse endpoint
    pub base: String,
    pub source: FeedSource,
    /// Query options; `start` is advanced from page to page
    pub options: FeedOptions,
}

impl PageRequest {
    /// Builds the URI for the page at the current `start` offset.
    pub fn uri(&self) -> Result<String> {
        match &self.source {
            FeedSource::Recent => uri_for_recent(&self.base, &self.options),
            FeedSource::Company(cik) => uri_for_cik(&self.base, cik, &self.options),
        }
    }
}

struct Cursor {
    request: PageRequest,
    start: usize,
    count: usize,
    exhausted: bool,
}

/// Streams parsed pages of a feed, one fetch per page.
///
/// `start` and `count` are read from the request options (with the given
/// defaults) and validated before the first fetch. Every page is fetched only
/// when the stream is polled for it, so a consumer that stops early issues no
/// further requests.
///
/// # Errors
///
/// The stream yields the first error it meets (invalid parameter, transport
/// failure, malformed page) and then ends.
pub fn pages<'a, T>(
    transport: &'a T,
    request: PageRequest,
    default_start: usize,
    default_count: usize,
) -> impl Stream<Item = Result<Vec<Filing>>> + Send + 'a
where
    T: Transport + ?Sized,
{
    let cursor = request.options.start_or(default_start).and_then(|start| {
        let count = request.options.count_or(default_count)?;
        Ok(Cursor {
            request,
            start,
            count,
            exhausted: false,
        })
    });

    stream::try_unfold(Some(cursor), move |state| next_page(transport, state))
}

type PageStep = Option<(Vec<Filing>, Option<Result<Cursor>>)>;

async fn next_page<T>(transport: &T, state: Option<Result<Cursor>>) -> Result<PageStep>
where
    T: Transport + ?Sized,
{
    let mut cursor = match state {
        None => return Ok(None),
        Some(cursor) => cursor?,
    };
    if cursor.exhausted {
        return Ok(None);
    }

    cursor.request.options = cursor
        .request
        .options
        .clone()
        .with_param(START, cursor.start.to_string())
        .with_param(COUNT, cursor.count.to_string());
    let uri = cursor.request.uri()?;

    let body = transport.fetch(&uri).await?;
    let filings = parse_entries(&body)?;
    tracing::debug!(
        "Parsed {} entries at start={} (count={})",
        filings.len(),
        cursor.start,
        cursor.count
    );

    if filings.is_empty() {
        tracing::debug!("Empty page at start={}; end of results", cursor.start);
        return Ok(None);
    }
    if filings.len() < cursor.count {
        tracing::debug!(
            "Short page at start={} ({} < {}); end of results",
            cursor.start,
            filings.len(),
            cursor.count
        );
        cursor.exhausted = true;
    }

    match cursor.start.checked_add(cursor.count) {
        Some(next) => cursor.start = next,
        None => {
            tracing::debug!(
                "Offset after start={} is not representable; end of results",
                cursor.start
            );
            cursor.exhausted = true;
        }
    }
    Ok(Some((filings, Some(Ok(cursor)))))
}

/// Drains `pages` into `sink` until `limit` filings were delivered.
async fn drain<S, F>(pages: S, limit: Option<usize>, mut sink: F) -> Result<usize>
where
    S: Stream<Item = Result<Vec<Filing>>> + Send,
    F: FnMut(Filing) -> Result<()> + Send,
{
    if limit == Some(0) {
        return Ok(0);
    }

    let mut pages = std::pin::pin!(pages);
    let mut delivered = 0;

    while let Some(page) = pages.try_next().await? {
        for filing in page {
            sink(filing)?;
            delivered += 1;
            if limit.is_some_and(|limit| delivered >= limit) {
                tracing::debug!("Limit of {} filings reached", delivered);
                return Ok(delivered);
            }
        }
    }

    Ok(delivered)
}

impl Edgar {
    /// Builds the "current filings" URI against this client's browse endpoint.
    pub fn uri_for_recent(&self, options: &FeedOptions) -> Result<String> {
        uri_for_recent(&self.urls.browse, options)
    }

    /// Builds a registrant's filings URI against this client's browse endpoint.
    pub fn uri_for_cik(&self, cik: &str, options: &FeedOptions) -> Result<String> {
        uri_for_cik(&self.urls.browse, cik, options)
    }

    fn page_request(&self, source: FeedSource, options: FeedOptions) -> PageRequest {
        PageRequest {
            base: self.urls.browse.clone(),
            source,
            options,
        }
    }
}

/// Feed operations for SEC EDGAR.
///
/// # Notes
///
/// * Pages are requested one after another, never concurrently
/// * `limit` counts filings, not pages; the last page may be cut short
/// * An error from the `recent` sink stops paging and is returned unchanged
#[async_trait]
impl FeedOperations for Edgar {
    async fn recent<F>(&self, options: FeedOptions, sink: F) -> Result<usize>
    where
        F: FnMut(Filing) -> Result<()> + Send,
    {
        let limit = options.limit();
        let request = self.page_request(FeedSource::Recent, options);
        drain(
            pages(self, request, DEFAULT_START, DEFAULT_COUNT),
            limit,
            sink,
        )
        .await
    }

    async fn find(&self, cik: &str, options: FeedOptions) -> Result<Vec<Filing>> {
        let limit = options.limit();
        let request = self.page_request(FeedSource::Company(cik.to_string()), options);

        let mut filings = Vec::new();
        drain(
            pages(self, request, DEFAULT_START, FIND_COUNT),
            limit,
            |filing| {
                filings.push(filing);
                Ok(())
            },
        )
        .await?;

        Ok(filings)
    }

    async fn recent_page(&self, options: &FeedOptions) -> Result<Vec<Filing>> {
        let uri = self.uri_for_recent(options)?;
        let body = self.get(&uri).await?;
        parse_entries(&body)
    }

    async fn company_page(&self, cik: &str, options: &FeedOptions) -> Result<Vec<Filing>> {
        let uri = self.uri_for_cik(cik, options)?;
        let body = self.get(&uri).await?;
        parse_entries(&body)
    }
}
