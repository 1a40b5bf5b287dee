use crate::{FeedKind, RequestId, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write a screen to the device.
    Show(Screen),
    FetchFeed { request: RequestId, feed: FeedKind },
    FetchPage { request: RequestId, url: String },
    /// Abort whatever fetch is in flight.
    CancelFetch,
}
