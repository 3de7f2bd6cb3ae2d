use super::error::{EdgarError, Result};
use std::collections::BTreeMap;

pub(crate) const START: &str = "start";
pub(crate) const COUNT: &str = "count";
pub(crate) const TYPE: &str = "type";
pub(crate) const CIK: &str = "CIK";

/// Query options for the browse feed.
///
/// Parameters are kept as strings, the way they travel on the wire. The typed
/// setters write well-formed values; [`FeedOptions::with_param`] accepts anything
/// and leaves validation to URI construction, where a non-numeric `start` or
/// `count` is rejected before any request is made.
///
/// `limit` is not a query parameter: it caps how many filings a paging call
/// delivers in total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedOptions {
    params: BTreeMap<String, String>,
    limit: Option<usize>,
}

impl FeedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(self, start: usize) -> Self {
        self.with_param(START, start.to_string())
    }

    pub fn with_count(self, count: usize) -> Self {
        self.with_param(COUNT, count.to_string())
    }

    pub fn with_cik(self, cik: impl Into<String>) -> Self {
        self.with_param(CIK, cik)
    }

    /// Restricts results to a single form type, e.g. `10-K`.
    pub fn with_form_type(self, form_type: impl Into<String>) -> Self {
        self.with_param(TYPE, form_type)
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the `start` offset, or `default` when unset.
    pub fn start_or(&self, default: usize) -> Result<usize> {
        self.numeric(START, default)
    }

    /// Returns the page size, or `default` when unset. Zero is rejected.
    pub fn count_or(&self, default: usize) -> Result<usize> {
        match self.numeric(COUNT, default)? {
            0 => Err(EdgarError::InvalidParameter(
                "count must be greater than zero".to_string(),
            )),
            count => Ok(count),
        }
    }

    fn numeric(&self, key: &str, default: usize) -> Result<usize> {
        match self.params.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                EdgarError::InvalidParameter(format!(
                    "{} must be a non-negative integer, got {:?}",
                    key, raw
                ))
            }),
        }
    }
}
