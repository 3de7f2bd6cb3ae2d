//! Pattern extraction from the free text of atom entries.
//!
//! The browse feed embeds several fields in prose instead of dedicated elements:
//! the registrant CIK sits in parentheses inside the title, the accession number
//! and filing date inside the HTML summary. Each helper takes raw text and returns
//! the matched value, if any.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// A ten-digit key, optionally followed by the role tag that closes the title.
static TITLE_CIK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{10})\)(?:\s*\([^()]*\))?\s*$")
        .expect("title CIK regex is hardcoded and valid")
});

static TITLE_ANY_CIK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{10})\)").expect("loose title CIK regex is hardcoded and valid")
});

static LINK_CIK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/edgar/data/(\d+)/").expect("link CIK regex is hardcoded and valid")
});

static TITLE_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S.*?)\s+-\s").expect("title term regex is hardcoded and valid"));

static ID_ACCESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"accession-number=([0-9A-Za-z-]+)").expect("id accession regex is hardcoded and valid")
});

// Summary labels are wrapped in <b> tags once entities are decoded.
static SUMMARY_ACCESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"AccNo:(?:\s|</?b>)*([0-9][0-9-]*)")
        .expect("summary accession regex is hardcoded and valid")
});

static SUMMARY_FILED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Filed:(?:\s|</?b>)*(\d{4}-\d{2}-\d{2})")
        .expect("summary date regex is hardcoded and valid")
});

static SUMMARY_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Type:(?:\s|</?b>)*([^\s<]+)").expect("summary type regex is hardcoded and valid")
});

fn first_capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// `4 - Smith John (0001572871) (Reporting)` → `0001572871`
///
/// Shorter parenthesised numbers, such as a year in a fund name, are not keys.
pub fn cik_from_title(title: &str) -> Option<&str> {
    first_capture(&TITLE_CIK, title).or_else(|| first_capture(&TITLE_ANY_CIK, title))
}

/// `https://www.sec.gov/Archives/edgar/data/320193/...` → `320193`
pub fn cik_from_link(link: &str) -> Option<&str> {
    first_capture(&LINK_CIK, link)
}

/// `10-K  - Annual report [Section 13 and 15(d)]` → `10-K`
pub fn term_from_title(title: &str) -> Option<&str> {
    first_capture(&TITLE_TERM, title)
}

/// `Type: 8-K` anywhere in the summary.
pub fn term_from_summary(summary: &str) -> Option<&str> {
    first_capture(&SUMMARY_TYPE, summary)
}

/// `urn:tag:sec.gov,2008:accession-number=0001140361-14-019536` → `0001140361-14-019536`
pub fn accession_from_id(id: &str) -> Option<&str> {
    first_capture(&ID_ACCESSION, id)
}

/// `<b>AccNo:</b> 0001140361-14-019536` → `0001140361-14-019536`
pub fn accession_from_summary(summary: &str) -> Option<&str> {
    first_capture(&SUMMARY_ACCESSION, summary)
}

/// `<b>Filed:</b> 2014-04-01` → 2014-04-01
pub fn filed_date_from_summary(summary: &str) -> Option<NaiveDate> {
    first_capture(&SUMMARY_FILED, summary).and_then(parse_day)
}

/// Truncates an atom timestamp to its calendar date.
///
/// The local date of the timestamp is kept; no timezone conversion happens.
pub fn date_from_timestamp(timestamp: &str) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| timestamp.get(..10).and_then(parse_day))
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
