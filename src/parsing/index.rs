use super::{FilingParser, sealed};
use crate::Result;
use crate::filing::Filing;
use chrono::NaiveDate;
use std::str::FromStr;

/// Archive root that relative index paths (`edgar/data/...`) hang off.
pub const ARCHIVES_PREFIX: &str = "https://www.sec.gov/Archives/";

#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Forces a layout instead of detecting it from the column header.
    pub index_type: Option<IndexType>,
    /// Prefix joined with each relative path to form the filing link.
    pub archives_prefix: String,
    pub max_entries: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_type: None,
            archives_prefix: ARCHIVES_PREFIX.to_string(),
            max_entries: None,
        }
    }
}

/// Column layout of a bulk index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexType {
    /// `form.idx`: form type, company name, CIK, date, path.
    #[default]
    Form,
    /// `company.idx`: company name, form type, CIK, date, path.
    Company,
    /// `master.idx`: `CIK|Company Name|Form Type|Date Filed|Filename`.
    Master,
}

impl IndexType {
    pub const VARIANTS: &'static [(&'static str, IndexType)] = &[
        ("form", IndexType::Form),
        ("company", IndexType::Company),
        ("master", IndexType::Master),
    ];

    pub fn as_str(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, variant)| variant == self)
            .map(|(s, _)| *s)
            .unwrap_or("form")
    }

    /// Picks the layout from the column header line printed above the separator.
    fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        if header.contains('|') {
            Some(IndexType::Master)
        } else if header.starts_with("Form Type") {
            Some(IndexType::Form)
        } else if header.starts_with("Company Name") {
            Some(IndexType::Company)
        } else {
            None
        }
    }
}

impl FromStr for IndexType {
    type Err = crate::EdgarError;

    fn from_str(s: &str) -> Result<Self> {
        Self::VARIANTS
            .iter()
            .find(|(pattern, _)| s.to_lowercase().contains(pattern))
            .map(|(_, variant)| *variant)
            .ok_or_else(|| crate::EdgarError::InvalidFormat("Unknown index type".to_string()))
    }
}

/// A parser for EDGAR bulk index files.
///
/// The input is a block of descriptive header lines, a column header, a separator
/// made solely of dashes, then one row per filing. Everything up to and including
/// the separator is skipped; without a separator the result is empty.
///
/// Rows are tokenized on whitespace from the right, since the trailing CIK, date and
/// path have rigid shapes while company names and some form types (`SC 13G`) contain
/// spaces. Rows that do not yield a numeric CIK, a date and a `.txt` path are
/// skipped.
///
/// # Examples
///
/// ```
/// use secquery::parsing::index::{IndexConfig, IndexParser};
///
/// let raw = "Form Type   Company Name            CIK         Date Filed  File Name\n\
///            ---------------------------------------------------------------------\n\
///            10-K        APPLE INC               320193      2023-11-03  edgar/data/320193/0000320193-23-000106.txt\n";
///
/// let filings = IndexParser::new(IndexConfig::default()).parse_str(raw);
/// assert_eq!(filings.len(), 1);
/// assert_eq!(filings[0].term, "10-K");
/// assert_eq!(filings[0].cik, "320193");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexParser {
    config: IndexConfig,
}

impl IndexParser {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Parses a whole index in one pass over its lines.
    pub fn parse_str(&self, raw: &str) -> Vec<Filing> {
        let mut lines = raw.lines();
        let mut header = "";
        let mut found_separator = false;

        for line in lines.by_ref() {
            if is_separator(line) {
                found_separator = true;
                break;
            }
            if !line.trim().is_empty() {
                header = line;
            }
        }

        if !found_separator {
            tracing::debug!("No separator line found; index is empty");
            return Vec::new();
        }

        let index_type = self
            .config
            .index_type
            .or_else(|| IndexType::from_header(header))
            .unwrap_or_default();

        let mut filings = Vec::new();
        for line in lines {
            if self.config.max_entries.is_some_and(|max| filings.len() >= max) {
                break;
            }
            match self.parse_line(line, index_type) {
                Some(filing) => filings.push(filing),
                None if line.trim().is_empty() => {}
                None => tracing::trace!("Skipping index line: {:?}", line),
            }
        }

        filings
    }

    /// Parses a single row, or returns `None` when it does not have the shape of one.
    fn parse_line(&self, line: &str, index_type: IndexType) -> Option<Filing> {
        let row = match index_type {
            IndexType::Master => split_delimited(line)?,
            IndexType::Form | IndexType::Company => split_aligned(line, index_type)?,
        };

        if row.term.is_empty() || !is_cik(row.cik) || !row.path.ends_with(".txt") {
            return None;
        }
        let date = parse_date(row.date)?;

        Some(Filing::new(row.cik, row.term, date, self.link_for(row.path)))
    }

    fn link_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.archives_prefix, path.trim_start_matches('/'))
        }
    }
}

impl sealed::Sealed for IndexParser {}

impl FilingParser for IndexParser {
    fn parse(&self, raw: &str) -> Result<Vec<Filing>> {
        Ok(self.parse_str(raw))
    }
}

/// Parses a form index with the default configuration.
///
/// Malformed input yields an empty sequence rather than an error.
pub fn filings_for_index(raw: &str) -> Vec<Filing> {
    IndexParser::default().parse_str(raw)
}

struct Row<'a> {
    term: &'a str,
    cik: &'a str,
    date: &'a str,
    path: &'a str,
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

fn is_cik(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .ok()
}

/// Peels the last whitespace-separated token off `text`.
fn pop_token(text: &str) -> Option<(&str, &str)> {
    let (rest, token) = text.trim_end().rsplit_once(char::is_whitespace)?;
    Some((rest, token))
}

fn split_aligned(line: &str, index_type: IndexType) -> Option<Row<'_>> {
    let (rest, path) = pop_token(line)?;
    let (rest, date) = pop_token(rest)?;
    let (prefix, cik) = pop_token(rest)?;
    let prefix = prefix.trim();

    let (term, company) = match index_type {
        IndexType::Company => prefix
            .rsplit_once("  ")
            .map(|(company, term)| (term, company))
            .or_else(|| {
                prefix
                    .rsplit_once(char::is_whitespace)
                    .map(|(company, term)| (term, company))
            })?,
        _ => prefix
            .split_once("  ")
            .or_else(|| prefix.split_once(char::is_whitespace))?,
    };

    if company.trim().is_empty() {
        return None;
    }

    Some(Row {
        term: term.trim(),
        cik,
        date,
        path,
    })
}

fn split_delimited(line: &str) -> Option<Row<'_>> {
    let mut fields = line.split('|').map(str::trim);
    let cik = fields.next()?;
    let _company = fields.next()?;
    let term = fields.next()?;
    let date = fields.next()?;
    let path = fields.next()?;

    Some(Row {
        term,
        cik,
        date,
        path,
    })
}
