use crate::{FeedItem, FeedKind, FetchFailure, PageData, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The device finished dialing; starts a fresh session.
    Connected,
    /// The device hung up or reset the modem.
    Disconnected,
    /// A completed line typed on the device (without the CR).
    Input(String),
    /// Engine delivered a curated feed.
    FeedLoaded {
        request: RequestId,
        feed: FeedKind,
        items: Vec<FeedItem>,
    },
    /// Engine failed to deliver a curated feed.
    FeedFailed {
        request: RequestId,
        feed: FeedKind,
        failure: FetchFailure,
    },
    /// Engine fetched and extracted a page.
    PageLoaded { request: RequestId, page: PageData },
    /// Engine failed to fetch or extract a page.
    PageFailed {
        request: RequestId,
        failure: FetchFailure,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
