//! Atom feed parser module.
//!
//! Deserializes the atom documents served by `browse-edgar` and maps each `entry`
//! onto a [`Filing`]. Both flavours are handled: the "current filings" feed, whose
//! entries carry the CIK in the title and the accession number in the HTML summary,
//! and the company feed, whose entries carry a structured `content` block and a
//! feed-level `company-info`.
use super::extract::{
    accession_from_id, accession_from_summary, cik_from_link, cik_from_title,
    date_from_timestamp, filed_date_from_summary, term_from_summary, term_from_title,
};
use super::{FilingParser, sealed};
use crate::error::{EdgarError, Result};
use crate::filing::Filing;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AtomFeed {
    // Required so that text or an unrelated root element fails to parse.
    #[allow(dead_code)]
    title: Text,
    #[serde(rename = "company-info", default)]
    company_info: Option<CompanyInfo>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct CompanyInfo {
    #[serde(default)]
    cik: Option<String>,
}

/// Element text, ignoring attributes such as `type="html"`.
#[derive(Debug, Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: Option<Text>,
    #[serde(rename = "link", default)]
    links: Vec<Link>,
    #[serde(default)]
    summary: Option<Text>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@href")]
    href: String,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "@term")]
    term: String,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(rename = "accession-number")]
    accession_number: Option<String>,
    #[serde(rename = "filing-date")]
    filing_date: Option<String>,
    #[serde(rename = "filing-href")]
    filing_href: Option<String>,
    #[serde(rename = "filing-type")]
    filing_type: Option<String>,
}

impl AtomEntry {
    fn primary_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel.as_deref() == Some("alternate"))
            .or_else(|| self.links.first())
            .map(|l| l.href.trim())
            .filter(|href| !href.is_empty())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Parser for `browse-edgar` atom documents.
///
/// # Example
/// ```
/// use secquery::parsing::atom::FeedParser;
///
/// let xml = r#"<?xml version="1.0" encoding="ISO-8859-1" ?>
/// <feed xmlns="http://www.w3.org/2005/Atom">
///   <title>Latest Filings</title>
///   <entry>
///     <title>4 - Smith John (0001572871) (Reporting)</title>
///     <link rel="alternate" type="text/html" href="https://www.sec.gov/Archives/edgar/data/1572871/000114036114019536/0001140361-14-019536-index.htm"/>
///     <summary type="html"> &lt;b&gt;Filed:&lt;/b&gt; 2014-04-01 &lt;b&gt;AccNo:&lt;/b&gt; 0001140361-14-019536</summary>
///     <updated>2014-04-01T17:23:01-04:00</updated>
///     <category scheme="https://www.sec.gov/" label="form type" term="4"/>
///     <id>urn:tag:sec.gov,2008:accession-number=0001140361-14-019536</id>
///   </entry>
/// </feed>"#;
///
/// let filings = FeedParser::new().parse_str(xml)?;
/// assert_eq!(filings[0].cik, "0001572871");
/// assert_eq!(filings[0].term, "4");
/// # Ok::<(), secquery::EdgarError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a whole atom document.
    ///
    /// # Errors
    ///
    /// * `EdgarError::XmlError` - the document is not well-formed or not a feed
    /// * `EdgarError::InvalidFormat` - an entry has neither a link nor a date
    pub fn parse_str(&self, xml: &str) -> Result<Vec<Filing>> {
        let feed: AtomFeed = quick_xml::de::from_str(xml)?;
        let feed_cik = feed
            .company_info
            .as_ref()
            .and_then(|info| info.cik.as_deref())
            .and_then(non_empty);

        feed.entries
            .iter()
            .map(|entry| Self::filing_from_entry(entry, feed_cik))
            .collect()
    }

    fn filing_from_entry(entry: &AtomEntry, feed_cik: Option<&str>) -> Result<Filing> {
        let content = entry.content.as_ref();
        let title = entry.title.as_ref().and_then(|t| non_empty(&t.value));
        let summary = entry.summary.as_ref().and_then(|s| non_empty(&s.value));
        let id = entry.id.as_deref().and_then(non_empty);

        let link = entry
            .primary_link()
            .or_else(|| content.and_then(|c| c.filing_href.as_deref()).and_then(non_empty))
            .ok_or_else(|| {
                EdgarError::InvalidFormat(format!("feed entry {:?} has no link", id))
            })?;

        let date = content
            .and_then(|c| c.filing_date.as_deref())
            .and_then(date_from_timestamp)
            .or_else(|| summary.and_then(filed_date_from_summary))
            .or_else(|| entry.updated.as_deref().and_then(date_from_timestamp))
            .ok_or_else(|| {
                EdgarError::InvalidFormat(format!("feed entry {:?} has no filing date", id))
            })?;

        let cik = title
            .and_then(cik_from_title)
            .or(feed_cik)
            .or_else(|| cik_from_link(link))
            .unwrap_or_default();
        if cik.is_empty() {
            tracing::warn!("No CIK found for feed entry {:?}", id);
        }

        let term = entry
            .category
            .as_ref()
            .and_then(|c| non_empty(&c.term))
            .or_else(|| title.and_then(term_from_title))
            .or_else(|| content.and_then(|c| c.filing_type.as_deref()).and_then(non_empty))
            .or_else(|| summary.and_then(term_from_summary))
            .unwrap_or_default();

        let file_id = id
            .and_then(accession_from_id)
            .or_else(|| summary.and_then(accession_from_summary))
            .or_else(|| content.and_then(|c| c.accession_number.as_deref()).and_then(non_empty))
            .or(id);

        Ok(Filing {
            cik: cik.to_string(),
            title: title.map(str::to_string),
            summary: summary.map(str::to_string),
            link: link.to_string(),
            term: term.to_string(),
            date,
            file_id: file_id.map(str::to_string),
        })
    }
}

impl sealed::Sealed for FeedParser {}

impl FilingParser for FeedParser {
    fn parse(&self, raw: &str) -> Result<Vec<Filing>> {
        self.parse_str(raw)
    }
}

/// Parses every entry of an atom document into a [`Filing`].
pub fn parse_entries(xml: &str) -> Result<Vec<Filing>> {
    FeedParser::new().parse_str(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const COMPANY_ENTRY: &str = r#"<?xml version="1.0" encoding="ISO-8859-1" ?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <author><email>webmaster@sec.gov</email><name>Webmaster</name></author>
  <company-info>
    <cik>0000320193</cik>
    <conformed-name>Apple Inc.</conformed-name>
  </company-info>
  <link href="https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany" rel="alternate" type="text/html"/>
  <title>Apple Inc.  (0000320193)</title>
  <updated>2024-01-05T12:00:00-05:00</updated>
  <entry>
    <category label="form type" scheme="https://www.sec.gov/" term="10-K"/>
    <content type="text/xml">
      <accession-number>0000320193-23-000106</accession-number>
      <act>34</act>
      <filing-date>2023-11-03</filing-date>
      <filing-href>https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm</filing-href>
      <filing-type>10-K</filing-type>
      <form-name>Annual report</form-name>
    </content>
    <id>urn:tag:sec.gov,2008:accession-number=0000320193-23-000106</id>
    <link href="https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/0000320193-23-000106-index.htm" rel="alternate" type="text/html"/>
    <summary type="html"> &lt;b&gt;Filed:&lt;/b&gt; 2023-11-03 &lt;b&gt;AccNo:&lt;/b&gt; 0000320193-23-000106 &lt;b&gt;Size:&lt;/b&gt; 9 MB</summary>
    <title>10-K  - Annual report [Section 13 and 15(d), not S-K Item 405]</title>
    <updated>2023-11-02T18:08:27-04:00</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_invalid_xml() {
        assert!(parse_entries("invalid xml").is_err());
    }

    #[test]
    fn test_truncated_document_fails() {
        let truncated = &COMPANY_ENTRY[..COMPANY_ENTRY.len() / 2];
        assert!(matches!(
            parse_entries(truncated),
            Err(EdgarError::XmlError(_))
        ));
    }

    #[test]
    fn test_feed_without_entries() {
        let empty = r#"<?xml version="1.0"?><feed><title>Latest Filings</title></feed>"#;
        assert!(parse_entries(empty).unwrap().is_empty());
    }

    #[test]
    fn test_company_entry() {
        let filings = parse_entries(COMPANY_ENTRY).unwrap();
        assert_eq!(filings.len(), 1);

        let filing = &filings[0];
        assert_eq!(filing.cik, "0000320193");
        assert_eq!(filing.term, "10-K");
        assert_eq!(filing.date, NaiveDate::from_ymd_opt(2023, 11, 3).unwrap());
        assert_eq!(filing.file_id.as_deref(), Some("0000320193-23-000106"));
        assert!(filing.link.starts_with("https://www.sec.gov/Archives/edgar/data/320193/"));
        assert!(filing.summary.as_deref().unwrap().contains("<b>AccNo:</b>"));
        assert_eq!(
            filing.title.as_deref(),
            Some("10-K  - Annual report [Section 13 and 15(d), not S-K Item 405]")
        );
    }

    #[test]
    fn test_entry_without_cik_is_kept() {
        let xml = r#"<feed><title>t</title><entry>
            <title>8-K - Unknown filer</title>
            <link href="https://example.com/filing.htm"/>
            <updated>2024-02-01T08:00:00-05:00</updated>
            <id>urn:uuid:42</id>
        </entry></feed>"#;

        let filings = parse_entries(xml).unwrap();
        assert_eq!(filings.len(), 1);
        assert_eq!(filings[0].cik, "");
        assert_eq!(filings[0].term, "8-K");
        assert_eq!(filings[0].file_id.as_deref(), Some("urn:uuid:42"));
    }

    #[test]
    fn test_links_separated_by_other_elements() {
        let xml = r#"<feed><title>t</title><entry>
            <link rel="related" href="https://www.sec.gov/cgi-bin/browse-edgar?action=getcompany"/>
            <title>8-K - APPLE INC (0000320193) (Filer)</title>
            <link rel="alternate" href="https://www.sec.gov/Archives/edgar/data/320193/000032019324000001/0000320193-24-000001-index.htm"/>
            <updated>2024-02-01T08:00:00-05:00</updated>
        </entry></feed>"#;

        let filings = parse_entries(xml).unwrap();
        assert_eq!(filings.len(), 1);
        assert_eq!(
            filings[0].link,
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000001/0000320193-24-000001-index.htm"
        );
        assert_eq!(filings[0].cik, "0000320193");
    }

    #[test]
    fn test_entry_without_link_fails() {
        let xml = r#"<feed><title>t</title><entry>
            <title>8-K - Filer (0000000001) (Filer)</title>
            <updated>2024-02-01T08:00:00-05:00</updated>
        </entry></feed>"#;

        assert!(matches!(
            parse_entries(xml),
            Err(EdgarError::InvalidFormat(_))
        ));
    }
}
