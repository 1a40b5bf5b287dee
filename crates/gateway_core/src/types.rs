use std::fmt;

pub type RequestId = u64;

/// The curated feeds reachable from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    HackerNews,
    Reddit,
}

impl FeedKind {
    /// Header shown above the feed list.
    pub fn heading(self) -> &'static str {
        match self {
            FeedKind::HackerNews => "=== HACKER NEWS ===",
            FeedKind::Reddit => "=== r/technology ===",
        }
    }

    /// Notice shown while the feed is being fetched.
    pub fn fetching_notice(self) -> &'static str {
        match self {
            FeedKind::HackerNews => "Fetching HN...",
            FeedKind::Reddit => "Fetching Reddit...",
        }
    }

    /// Base for resolving relative item targets.
    pub fn base_url(self) -> &'static str {
        match self {
            FeedKind::HackerNews => "https://news.ycombinator.com/",
            FeedKind::Reddit => "https://old.reddit.com/",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::HackerNews => write!(f, "hacker-news"),
            FeedKind::Reddit => write!(f, "reddit"),
        }
    }
}

/// A headline from a curated feed. `target` may be relative to the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub target: String,
}

/// An outbound link of a fetched page; `url` is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub text: String,
}

/// Extracted content of a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageData {
    pub title: Option<String>,
    pub chunks: Vec<String>,
    pub links: Vec<Link>,
}

/// Fetch outcomes the session distinguishes when choosing where to land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Validation(String),
    Transport,
    Timeout,
    HttpStatus(u16),
    Other(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Validation(reason) => write!(f, "{reason}"),
            FetchFailure::Transport => write!(f, "Connection failed"),
            FetchFailure::Timeout => write!(f, "Timeout - site too slow"),
            FetchFailure::HttpStatus(code) => write!(f, "HTTP Error {code}"),
            FetchFailure::Other(message) => write!(f, "{message}"),
        }
    }
}
