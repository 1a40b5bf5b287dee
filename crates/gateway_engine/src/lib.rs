//! Gateway engine: HTTP fetching, content extraction and the background worker.
mod decode;
mod engine;
mod extract;
mod feeds;
mod fetch;
mod links;
mod page;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use engine::{EngineConfig, EngineHandle};
pub use extract::{chunk_words, Extractor, ReadabilityLikeExtractor, MAX_CHUNK_CHARS, MAX_LINKS};
pub use feeds::{parse_feed, FeedFetcher, FeedSource, MAX_FEED_ITEMS};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use links::extract_links;
pub use page::PageFetcher;
pub use types::{
    EngineEvent, ExtractedContent, ExtractedLink, FailureKind, FeedEntry, FetchError,
    FetchMetadata, FetchOutput, Job, RequestId,
};
