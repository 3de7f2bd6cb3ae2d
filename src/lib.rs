//! # secquery - filing discovery for the SEC EDGAR registry
//!
//! secquery finds and parses disclosure filings published by the SEC's EDGAR
//! (Electronic Data Gathering, Analysis, and Retrieval) system. Two sources feed a
//! single [`Filing`] record:
//!
//! - **Bulk form indices** - the daily and quarterly `form.idx` manifests, parsed by
//!   [`filings_for_index`]
//! - **Browse feeds** - the paginated atom documents served by `browse-edgar`, parsed
//!   by [`parse_entries`] and paged through by [`FeedOperations`]
//!
//! Every network access goes through the [`Transport`] trait. [`Edgar`] uses a
//! `reqwest` backed [`HttpTransport`] by default, and [`Edgar::with_transport`]
//! accepts any other implementation.
//!
//! ## Requirements
//!
//! The network operations are async and need a runtime such as
//! [tokio](https://tokio.rs). The parsers and URI builders are plain functions.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use secquery::{Edgar, FeedOperations, FeedOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // SEC.gov requires a descriptive user agent
//!     let edgar = Edgar::new("YourAppName contact@example.com")?;
//!
//!     let options = FeedOptions::new().with_form_type("10-K").with_limit(5);
//!     let filings = edgar.find("320193", options).await?;
//!
//!     for filing in filings {
//!         println!("{} filed on {}: {}", filing.term, filing.date, filing.link);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod filing;
pub mod parsing;
mod traits;

#[cfg(feature = "feeds")]
mod feeds;
#[cfg(feature = "index")]
mod index;
#[cfg(feature = "feeds")]
mod options;
#[cfg(feature = "feeds")]
mod uri;

pub use config::{EdgarConfig, EdgarUrls};
pub use core::{Edgar, HttpTransport};
pub use error::{EdgarError, Result};
pub use filing::Filing;
pub use parsing::FilingParser;
pub use parsing::index::filings_for_index;
pub use traits::Transport;

#[cfg(feature = "feeds")]
pub use feeds::{FeedSource, PageRequest, pages};
#[cfg(feature = "feeds")]
pub use options::FeedOptions;
#[cfg(feature = "feeds")]
pub use parsing::atom::parse_entries;
#[cfg(feature = "feeds")]
pub use uri::{DEFAULT_BROWSE_URL, uri_for_cik, uri_for_recent};

#[cfg(feature = "index")]
pub use index::{EdgarDay, EdgarPeriod, Quarter};

#[cfg(feature = "feeds")]
pub use traits::FeedOperations;
#[cfg(feature = "index")]
pub use traits::IndexOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
