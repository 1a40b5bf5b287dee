use std::sync::Arc;

use gateway_engine::{
    parse_feed, FailureKind, FeedFetcher, FeedSource, FetchSettings, ReqwestFetcher,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HN_PAGE: &str = r#"
<table>
  <tr class="athing"><td><span class="titleline"><a href="https://example.com/a">First story</a><span class="sitebit"><a href="from?site=example.com">example.com</a></span></span></td></tr>
  <tr class="athing"><td><span class="titleline"><a href="item?id=2">Ask HN:   what now?</a></span></td></tr>
</table>
"#;

const REDDIT_PAGE: &str = r#"
<div class="thing"><p class="title"><a class="title" href="/r/technology/comments/1">Chips</a></p></div>
<div class="thing promoted"><p class="title"><a class="title" href="https://ads.example/">Sponsored</a></p></div>
<div class="thing"><span>no title link</span></div>
"#;

#[test]
fn hacker_news_titles_in_source_order() {
    let entries = parse_feed(HN_PAGE, &FeedSource::hacker_news()).expect("items");
    let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["First story", "Ask HN: what now?"]);
    assert_eq!(entries[1].href, "item?id=2");
}

#[test]
fn reddit_items_without_a_title_link_are_skipped() {
    let entries = parse_feed(REDDIT_PAGE, &FeedSource::reddit_technology()).expect("items");
    let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Chips", "Sponsored"]);
}

#[test]
fn feed_is_capped() {
    let rows: String = (0..40)
        .map(|i| format!("<span class=\"titleline\"><a href=\"/{i}\">Story {i}</a></span>"))
        .collect();
    let entries = parse_feed(&rows, &FeedSource::hacker_news()).expect("items");
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[14].title, "Story 14");
}

#[test]
fn empty_listing_is_an_error() {
    let err = parse_feed("<html><body>down for maintenance</body></html>", &FeedSource::hacker_news())
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::NoItems);
}

#[tokio::test]
async fn feed_fetcher_downloads_and_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(HN_PAGE, "text/html"))
        .mount(&server)
        .await;

    let fetcher = FeedFetcher::new(Arc::new(ReqwestFetcher::new(FetchSettings::for_feeds())));
    let source = FeedSource::hacker_news().at(format!("{}/news", server.uri()));
    let entries = fetcher.fetch(&source).await.expect("feed");
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn feed_fetcher_never_returns_partial_results_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(503).set_body_raw(HN_PAGE, "text/html"))
        .mount(&server)
        .await;

    let fetcher = FeedFetcher::new(Arc::new(ReqwestFetcher::new(FetchSettings::for_feeds())));
    let source = FeedSource::hacker_news().at(format!("{}/news", server.uri()));
    let err = fetcher.fetch(&source).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}
