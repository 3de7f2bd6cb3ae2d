//! The filing record shared by the index and feed parsers.
//!
//! A [`Filing`] carries no knowledge of which source produced it. Index rows fill
//! the registrant, form type, date, and archive link; feed entries additionally
//! carry their title, summary, and accession id.

use super::error::Result;
use super::traits::Transport;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single disclosure document: registrant, form type, date, and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// Central Index Key, kept verbatim (leading zeros included).
    pub cik: String,
    /// Raw entry title. `None` for index rows.
    pub title: Option<String>,
    /// Raw entry summary. `None` for index rows.
    pub summary: Option<String>,
    /// Absolute URL of the filing document in the archive.
    pub link: String,
    /// Form type code, e.g. `10-K` or `424B3`.
    pub term: String,
    pub date: NaiveDate,
    /// Accession id of the feed entry. `None` for index rows.
    pub file_id: Option<String>,
}

impl Filing {
    pub fn new(
        cik: impl Into<String>,
        term: impl Into<String>,
        date: NaiveDate,
        link: impl Into<String>,
    ) -> Self {
        Self {
            cik: cik.into(),
            title: None,
            summary: None,
            link: link.into(),
            term: term.into(),
            date,
            file_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.file_id = Some(file_id.into());
        self
    }

    /// Downloads the document behind [`Filing::link`].
    ///
    /// Every call performs a fresh fetch; nothing is cached on the record. The body
    /// is returned exactly as the transport delivered it.
    ///
    /// # Errors
    ///
    /// Propagates the transport error unchanged (network failure, 404, other
    /// non-success statuses).
    ///
    /// # Example
    ///
    /// ```ignore
    /// use secquery::{Edgar, Filing};
    ///
    /// let edgar = Edgar::new("MyApp contact@example.com")?;
    /// let filing = Filing::new(
    ///     "1572871",
    ///     "4",
    ///     chrono::NaiveDate::from_ymd_opt(2014, 4, 1).unwrap(),
    ///     "https://www.sec.gov/Archives/edgar/data/1572871/000114036114019536/0001140361-14-019536.txt",
    /// );
    /// let text = filing.content(&edgar).await?;
    /// ```
    pub async fn content<T>(&self, transport: &T) -> Result<String>
    where
        T: Transport + ?Sized,
    {
        transport.fetch(&self.link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Filing {
        Filing::new(
            "0000320193",
            "10-K",
            NaiveDate::from_ymd_opt(2023, 11, 3).unwrap(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm",
        )
    }

    #[test]
    fn test_new_leaves_feed_fields_unset() {
        let filing = sample();
        assert_eq!(filing.cik, "0000320193");
        assert!(filing.title.is_none());
        assert!(filing.summary.is_none());
        assert!(filing.file_id.is_none());
    }

    #[test]
    fn test_builder_sets_feed_fields() {
        let filing = sample()
            .with_title("10-K  - Annual report")
            .with_summary("Filed: 2023-11-03")
            .with_file_id("0000320193-23-000106");

        assert_eq!(filing.title.as_deref(), Some("10-K  - Annual report"));
        assert_eq!(filing.summary.as_deref(), Some("Filed: 2023-11-03"));
        assert_eq!(filing.file_id.as_deref(), Some("0000320193-23-000106"));
    }

    #[test]
    fn test_cik_serializes_as_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["cik"], "0000320193");
        assert_eq!(json["date"], "2023-11-03");
    }
}
