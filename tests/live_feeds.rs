use secquery::{Edgar, FeedOperations, FeedOptions};

#[tokio::test]
#[ignore]
async fn recent_filings() {
    let edgar = Edgar::new("test_agent example@example.com").unwrap();
    let options = FeedOptions::new().with_start(0).with_count(10).with_limit(10);

    let mut received = Vec::new();
    let delivered = edgar
        .recent(options, |filing| {
            received.push(filing);
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(delivered, 10);
    assert!(received.iter().all(|f| !f.link.is_empty()));
}

#[tokio::test]
#[ignore]
async fn find_annual_reports() {
    let edgar = Edgar::new("test_agent example@example.com").unwrap();
    let options = FeedOptions::new().with_form_type("10-K").with_limit(5);

    let filings = edgar.find("320193", options).await.unwrap();
    assert!(!filings.is_empty());
    assert!(filings.iter().all(|f| f.term == "10-K"));
}

#[tokio::test]
#[ignore]
async fn filing_content() {
    let edgar = Edgar::new("test_agent example@example.com").unwrap();
    let page = edgar
        .recent_page(&FeedOptions::new().with_count(10))
        .await
        .unwrap();

    let content = page[0].content(&edgar).await.unwrap();
    assert!(!content.is_empty());
}
