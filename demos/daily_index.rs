//! Downloads a daily form index and summarizes it by form type.
//!
//! Run with: `cargo run --example daily_index`

use secquery::{Edgar, EdgarDay, IndexOperations};
use std::collections::BTreeMap;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let edgar = Edgar::new("secquery demo user@example.com")?;

    let day = EdgarDay::new(2014, 1, 2)?;
    println!("Fetching form index for {}...", day.format_date());
    let filings = edgar.daily_filings(day).await?;
    println!("{} filings\n", filings.len());

    let mut by_form: BTreeMap<&str, usize> = BTreeMap::new();
    for filing in &filings {
        *by_form.entry(filing.term.as_str()).or_default() += 1;
    }

    let mut counts: Vec<_> = by_form.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (form, count) in counts.iter().take(10) {
        println!("{:<12} {}", form, count);
    }

    Ok(())
}
