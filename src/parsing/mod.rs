//! Parsers turning raw EDGAR payloads into [`Filing`] records.
//!
//! Two wire formats feed the same record type:
//! - [`index::IndexParser`] reads the whitespace-aligned (or `|`-delimited) bulk
//!   form index files.
//! - [`atom::FeedParser`] reads the atom documents served by `browse-edgar`.
//!
//! Both implement [`FilingParser`]. The trait is sealed; these are the only two
//! strategies.

#[cfg(feature = "feeds")]
pub mod atom;
#[cfg(feature = "feeds")]
pub mod extract;
pub mod index;

use crate::Result;
use crate::filing::Filing;

mod sealed {
    pub trait Sealed {}
}

/// Turns one raw document into the filings it lists.
pub trait FilingParser: sealed::Sealed {
    fn parse(&self, raw: &str) -> Result<Vec<Filing>>;
}
