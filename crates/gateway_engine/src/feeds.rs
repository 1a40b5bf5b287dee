use std::sync::Arc;

use scraper::{Html, Selector};

use crate::decode::decode_html;
use crate::extract::normalize_text;
use crate::{FailureKind, FeedEntry, FetchError, Fetcher};

pub const MAX_FEED_ITEMS: usize = 15;

/// Where a curated headline list lives and how to pick it out of the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    /// Relative story links are resolved against this.
    pub base_url: String,
    pub item_selector: String,
    pub link_selector: String,
    pub max_items: usize,
}

impl FeedSource {
    pub fn hacker_news() -> Self {
        Self {
            name: "Hacker News".to_string(),
            url: "https://news.ycombinator.com/".to_string(),
            base_url: "https://news.ycombinator.com/".to_string(),
            item_selector: ".titleline".to_string(),
            link_selector: "a".to_string(),
            max_items: MAX_FEED_ITEMS,
        }
    }

    pub fn reddit_technology() -> Self {
        Self {
            name: "Reddit r/technology".to_string(),
            url: "https://old.reddit.com/r/technology/".to_string(),
            base_url: "https://old.reddit.com/".to_string(),
            item_selector: ".thing".to_string(),
            link_selector: "a.title".to_string(),
            max_items: MAX_FEED_ITEMS,
        }
    }

    /// Same source served from somewhere else, keeping the selectors.
    pub fn at(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Picks headlines out of a listing page in source order.
///
/// An empty result is an error so callers never show a blank list.
pub fn parse_feed(html: &str, source: &FeedSource) -> Result<Vec<FeedEntry>, FetchError> {
    let item_sel = parse_selector(&source.item_selector)?;
    let link_sel = parse_selector(&source.link_selector)?;
    let doc = Html::parse_document(html);

    let entries: Vec<FeedEntry> = doc
        .select(&item_sel)
        .filter_map(|item| item.select(&link_sel).next())
        .filter_map(|link| {
            let title = normalize_text(link.text());
            if title.is_empty() {
                return None;
            }
            let href = link.value().attr("href").unwrap_or_default().trim().to_string();
            Some(FeedEntry { title, href })
        })
        .take(source.max_items)
        .collect();

    if entries.is_empty() {
        return Err(FetchError::new(
            FailureKind::NoItems,
            format!("no stories found on {}", source.name),
        ));
    }
    Ok(entries)
}

fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|err| {
        FetchError::new(
            FailureKind::ProcessingError,
            format!("bad selector {selector}: {err}"),
        )
    })
}

pub struct FeedFetcher {
    fetcher: Arc<dyn Fetcher>,
}

impl FeedFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn fetch(&self, source: &FeedSource) -> Result<Vec<FeedEntry>, FetchError> {
        let output = self.fetcher.fetch(&source.url).await?;
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        gateway_logging::gateway_debug!(
            "Feed {} fetched: {} bytes as {}",
            source.name,
            output.metadata.byte_len,
            decoded.encoding_label
        );
        parse_feed(&decoded.html, source)
    }
}
