//! Daily and quarterly form indices.
//!
//! EDGAR publishes *index files* that act as a manifest of filings, either for a single
//! day (daily index) or for an entire quarter (full index). They are addressed by a
//! fixed path convention rather than by query parameters:
//!
//! - `.../edgar/daily-index/<YEAR>/QTR<1-4>/form.<YYYYMMDD>.idx`
//! - `.../edgar/full-index/<YEAR>/QTR<1-4>/form.idx`
//!
//! This module implements `IndexOperations` for [`Edgar`]: it downloads the form index
//! for the requested day or quarter and parses it with
//! [`IndexParser`](crate::parsing::index::IndexParser).
//!
//! ```ignore
//! use secquery::{Edgar, EdgarDay, EdgarPeriod, IndexOperations};
//!
//! let edgar = Edgar::new("MyApp contact@example.com")?;
//! let day = EdgarDay::new(2014, 1, 2)?;
//!
//! let daily = edgar.daily_filings(day).await?;
//! let quarterly = edgar.period_filings(EdgarPeriod::from(day)).await?;
//! println!("{} of {} filings that quarter", daily.len(), quarterly.len());
//! ```

use super::Edgar;
use super::error::{EdgarError, Result};
use super::filing::Filing;
use super::parsing::index::{IndexConfig, IndexParser, IndexType};
use super::traits::IndexOperations;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

/// Calendar quarter; index directories are named `QTR1` .. `QTR4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quarter {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

impl Quarter {
    /// Quarter containing `month` (1-12).
    pub fn from_month(month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(EdgarError::InvalidMonth);
        }
        Self::from_number((month - 1) / 3 + 1).map_err(|_| EdgarError::InvalidMonth)
    }

    pub fn from_number(quarter: u32) -> Result<Self> {
        match quarter {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            _ => Err(EdgarError::InvalidQuarter),
        }
    }

    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

/// Oldest year the registry publishes indices for.
const FIRST_INDEX_YEAR: i32 = 1994;

fn check_year(year: i32) -> Result<()> {
    if year < FIRST_INDEX_YEAR {
        return Err(EdgarError::InvalidYear);
    }
    Ok(())
}

/// A business day whose daily form index can be requested.
///
/// ```rust
/// use secquery::{EdgarDay, Quarter};
///
/// let day = EdgarDay::new(2014, 1, 2)?;
/// assert_eq!(day.format_date(), "20140102");
/// assert_eq!(day.quarter(), Quarter::Q1);
/// # Ok::<(), secquery::EdgarError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgarDay {
    date: NaiveDate,
}

impl EdgarDay {
    /// # Errors
    ///
    /// `InvalidYear` before 1994, `InvalidMonth` outside 1-12, `InvalidDay` when the
    /// day does not exist in that month.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        check_year(year)?;
        Quarter::from_month(month)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(EdgarError::InvalidDay)?;
        Ok(Self { date })
    }

    pub fn from_date(date: NaiveDate) -> Result<Self> {
        check_year(date.year())?;
        Ok(Self { date })
    }

    /// `YYYYMMDD`, as used in daily index file names.
    pub fn format_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn quarter(&self) -> Quarter {
        match self.date.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }
}

/// A quarter whose full form index can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgarPeriod {
    year: i32,
    quarter: Quarter,
}

impl EdgarPeriod {
    pub fn new(year: i32, quarter: Quarter) -> Result<Self> {
        check_year(year)?;
        Ok(Self { year, quarter })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }
}

impl From<EdgarDay> for EdgarPeriod {
    fn from(day: EdgarDay) -> Self {
        Self {
            year: day.year(),
            quarter: day.quarter(),
        }
    }
}

impl Edgar {
    /// URL of the form index for a single day.
    pub fn daily_index_url(&self, day: EdgarDay) -> String {
        format!(
            "{}edgar/daily-index/{}/QTR{}/{}.{}.idx",
            self.urls.archives_prefix(),
            day.year(),
            day.quarter().as_u32(),
            IndexType::Form.as_str(),
            day.format_date()
        )
    }

    /// URL of the quarterly form index.
    pub fn full_index_url(&self, period: EdgarPeriod) -> String {
        format!(
            "{}edgar/full-index/{}/QTR{}/{}.idx",
            self.urls.archives_prefix(),
            period.year(),
            period.quarter().as_u32(),
            IndexType::Form.as_str()
        )
    }

    /// Fetches a form index and parses it against this client's archive root.
    async fn form_index(&self, url: &str) -> Result<Vec<Filing>> {
        let raw = self.get(url).await?;
        let parser = IndexParser::new(IndexConfig {
            index_type: Some(IndexType::Form),
            archives_prefix: self.urls.archives_prefix(),
            ..Default::default()
        });

        let filings = parser.parse_str(&raw);
        tracing::debug!("Parsed {} filings from {}", filings.len(), url);
        Ok(filings)
    }
}

/// Daily and quarterly form indices.
///
/// A missing index (weekends, holidays, future dates) surfaces as
/// `EdgarError::NotFound` from the transport.
#[async_trait]
impl IndexOperations for Edgar {
    async fn daily_filings(&self, day: EdgarDay) -> Result<Vec<Filing>> {
        self.form_index(&self.daily_index_url(day)).await
    }

    async fn period_filings(&self, period: EdgarPeriod) -> Result<Vec<Filing>> {
        self.form_index(&self.full_index_url(period)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edgar() -> Edgar {
        Edgar::new("test_agent example@example.com").unwrap()
    }

    #[test]
    fn test_daily_index_url() {
        let day = EdgarDay::new(2014, 1, 2).unwrap();
        assert_eq!(
            edgar().daily_index_url(day),
            "https://www.sec.gov/Archives/edgar/daily-index/2014/QTR1/form.20140102.idx"
        );
    }

    #[test]
    fn test_full_index_url() {
        let period = EdgarPeriod::new(2023, Quarter::Q3).unwrap();
        assert_eq!(
            edgar().full_index_url(period),
            "https://www.sec.gov/Archives/edgar/full-index/2023/QTR3/form.idx"
        );
    }

    #[test]
    fn test_day_validation() {
        assert!(matches!(
            EdgarDay::new(1993, 12, 31),
            Err(EdgarError::InvalidYear)
        ));
        assert!(matches!(
            EdgarDay::new(2014, 13, 1),
            Err(EdgarError::InvalidMonth)
        ));
        assert!(matches!(
            EdgarDay::new(2014, 2, 30),
            Err(EdgarError::InvalidDay)
        ));
        assert!(matches!(
            EdgarDay::new(2014, 1, 0),
            Err(EdgarError::InvalidDay)
        ));
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(Quarter::from_month(1).unwrap(), Quarter::Q1);
        assert_eq!(Quarter::from_month(3).unwrap(), Quarter::Q1);
        assert_eq!(Quarter::from_month(4).unwrap(), Quarter::Q2);
        assert_eq!(Quarter::from_month(12).unwrap(), Quarter::Q4);
        assert!(matches!(Quarter::from_month(0), Err(EdgarError::InvalidMonth)));
        assert!(matches!(Quarter::from_number(5), Err(EdgarError::InvalidQuarter)));

        assert_eq!(EdgarDay::new(2023, 8, 15).unwrap().quarter(), Quarter::Q3);
    }

    #[test]
    fn test_period_from_day() {
        let period = EdgarPeriod::from(EdgarDay::new(2014, 11, 3).unwrap());
        assert_eq!(period.year(), 2014);
        assert_eq!(period.quarter(), Quarter::Q4);
        assert!(matches!(
            EdgarPeriod::new(1990, Quarter::Q1),
            Err(EdgarError::InvalidYear)
        ));
    }
}
