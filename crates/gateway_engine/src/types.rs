use std::fmt;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Connect,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    NoItems,
    Cancelled,
    ProcessingError,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Connect => write!(f, "connection failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::NoItems => write!(f, "no items found"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::ProcessingError => write!(f, "processing error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// An outbound link with an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    pub url: String,
    pub text: String,
}

/// Readable parts of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub chunks: Vec<String>,
    pub links: Vec<ExtractedLink>,
}

/// One headline of a curated feed; `href` is as found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    FetchFeed {
        request: RequestId,
        source: crate::FeedSource,
    },
    FetchPage {
        request: RequestId,
        url: String,
    },
}

impl Job {
    pub fn request(&self) -> RequestId {
        match self {
            Job::FetchFeed { request, .. } | Job::FetchPage { request, .. } => *request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FeedFetched {
        request: RequestId,
        result: Result<Vec<FeedEntry>, FetchError>,
    },
    PageFetched {
        request: RequestId,
        result: Result<ExtractedContent, FetchError>,
    },
}

impl EngineEvent {
    pub fn request(&self) -> RequestId {
        match self {
            EngineEvent::FeedFetched { request, .. } | EngineEvent::PageFetched { request, .. } => {
                *request
            }
        }
    }
}
