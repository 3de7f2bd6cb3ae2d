//! Streams the latest filings and lists a registrant's annual reports.
//!
//! Run with: `cargo run --example recent_filings`

use secquery::{Edgar, FeedOperations, FeedOptions};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // SEC.gov requires a user agent in the format: "AppName contact@example.com"
    let edgar = Edgar::new("secquery demo user@example.com")?;

    println!("=== Latest filings ===\n");
    let options = FeedOptions::new().with_start(0).with_count(10).with_limit(10);
    let delivered = edgar
        .recent(options, |filing| {
            println!(
                "{}  {:<10} CIK {:<12} {}",
                filing.date, filing.term, filing.cik, filing.link
            );
            Ok(())
        })
        .await?;
    println!("\n{} filings received\n", delivered);

    println!("=== Apple Inc. annual reports ===\n");
    let options = FeedOptions::new().with_form_type("10-K").with_limit(5);
    let reports = edgar.find("320193", options).await?;
    for report in &reports {
        println!(
            "{}  {}  {}",
            report.date,
            report.file_id.as_deref().unwrap_or("-"),
            report.link
        );
    }

    if let Some(latest) = reports.first() {
        let content = latest.content(&edgar).await?;
        println!("\nLatest report index page: {} bytes", content.len());
    }

    Ok(())
}
