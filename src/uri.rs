//! Query URIs for the `browse-edgar` atom endpoint.
//!
//! Keys are emitted in byte order (so `CIK` sorts before `action`), which matches
//! the registry's own canonical form and keeps the output stable for comparison.
//! `company` is always present as a bare key with no value.

use super::error::{EdgarError, Result};
use super::options::{CIK, COUNT, FeedOptions, START, TYPE};
use std::collections::BTreeMap;

pub const DEFAULT_BROWSE_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar";

/// Offset used when `start` is not set.
pub(crate) const DEFAULT_START: usize = 0;
/// Page size used when `count` is not set.
pub(crate) const DEFAULT_COUNT: usize = 100;

/// Builds the "current filings" query.
///
/// Defaults: `start=0`, `count=100`. `CIK` and `type` are included only when set
/// to a non-empty value.
///
/// # Example
///
/// ```rust
/// use secquery::{FeedOptions, uri_for_recent, DEFAULT_BROWSE_URL};
///
/// let uri = uri_for_recent(DEFAULT_BROWSE_URL, &FeedOptions::new())?;
/// assert_eq!(
///     uri,
///     "https://www.sec.gov/cgi-bin/browse-edgar?action=getcurrent&company&count=100&output=atom&owner=include&start=0"
/// );
/// # Ok::<(), secquery::EdgarError>(())
/// ```
///
/// # Errors
///
/// `EdgarError::InvalidParameter` when `start` or `count` is not a non-negative
/// integer, or `count` is zero.
pub fn uri_for_recent(base: &str, options: &FeedOptions) -> Result<String> {
    build(base, "getcurrent", None, options)
}

/// Builds the query for a single registrant's filings.
///
/// Same defaults as [`uri_for_recent`], with `action=getcompany` and `CIK` forced
/// to `cik`.
pub fn uri_for_cik(base: &str, cik: &str, options: &FeedOptions) -> Result<String> {
    build(base, "getcompany", Some(cik), options)
}

fn build(base: &str, action: &str, cik: Option<&str>, options: &FeedOptions) -> Result<String> {
    let start = options.start_or(DEFAULT_START)?.to_string();
    let count = options.count_or(DEFAULT_COUNT)?.to_string();

    let mut params: BTreeMap<&str, Option<&str>> = options
        .params()
        .iter()
        .filter(|(key, value)| !(matches!(key.as_str(), TYPE | CIK) && value.trim().is_empty()))
        .map(|(key, value)| (key.as_str(), Some(value.as_str())))
        .collect();

    if let Some(cik) = cik {
        params.insert(CIK, Some(cik));
    }
    params.insert("action", Some(action));
    params.insert("company", None);
    params.insert("output", Some("atom"));
    params.insert("owner", Some("include"));
    params.insert(START, Some(start.as_str()));
    params.insert(COUNT, Some(count.as_str()));

    let query = params
        .into_iter()
        .map(|(key, value)| match value {
            None => Ok(key.to_string()),
            Some(value) => {
                let pair: &[(&str, &str)] = &[(key, value)];
                serde_urlencoded::to_string(pair)
                    .map_err(|e| EdgarError::InvalidParameter(e.to_string()))
            }
        })
        .collect::<Result<Vec<_>>>()?
        .join("&");

    Ok(format!("{}?{}", base, query))
}
