use gateway_core::{Effect, FeedItem, FeedKind, FetchFailure, Link, Msg, PageData, RequestId};
use gateway_engine::{
    EngineEvent, EngineHandle, ExtractedContent, FailureKind, FeedEntry, FeedSource, FetchError,
    Job,
};
use gateway_logging::{gateway_debug, gateway_info, gateway_warn};

/// Turns fetch effects into engine jobs and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    /// Engine feed events don't say which feed they were for.
    feed_in_flight: Option<(RequestId, FeedKind)>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            feed_in_flight: None,
        }
    }

    /// Runs one non-display effect.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Show(_) => {}
            Effect::FetchFeed { request, feed } => {
                gateway_info!("FetchFeed request={} feed={}", request, feed);
                self.feed_in_flight = Some((request, feed));
                self.engine.submit(Job::FetchFeed {
                    request,
                    source: feed_source(feed),
                });
            }
            Effect::FetchPage { request, url } => {
                gateway_info!("FetchPage request={} url={}", request, url);
                self.engine.submit(Job::FetchPage { request, url });
            }
            Effect::CancelFetch => {
                gateway_debug!("Cancelling in-flight fetch");
                self.feed_in_flight = None;
                self.engine.cancel();
            }
        }
    }

    /// Collects every engine event that has arrived since the last call.
    pub fn drain(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = self.to_msg(event) {
                msgs.push(msg);
            }
        }
        msgs
    }

    fn to_msg(&mut self, event: EngineEvent) -> Option<Msg> {
        match event {
            EngineEvent::FeedFetched { request, result } => {
                let feed = match self.feed_in_flight {
                    Some((pending, feed)) if pending == request => feed,
                    _ => {
                        gateway_debug!("Dropping stale feed result for request {}", request);
                        return None;
                    }
                };
                self.feed_in_flight = None;
                Some(match result {
                    Ok(entries) => Msg::FeedLoaded {
                        request,
                        feed,
                        items: entries.into_iter().map(map_entry).collect(),
                    },
                    Err(err) => {
                        gateway_warn!("Feed {} failed: {}", feed, err);
                        Msg::FeedFailed {
                            request,
                            feed,
                            failure: map_failure(&err),
                        }
                    }
                })
            }
            EngineEvent::PageFetched { request, result } => Some(match result {
                Ok(content) => Msg::PageLoaded {
                    request,
                    page: map_content(content),
                },
                Err(err) => {
                    if err.kind != FailureKind::Cancelled {
                        gateway_warn!("Page request {} failed: {}", request, err);
                    }
                    Msg::PageFailed {
                        request,
                        failure: map_failure(&err),
                    }
                }
            }),
        }
    }
}

fn feed_source(feed: FeedKind) -> FeedSource {
    match feed {
        FeedKind::HackerNews => FeedSource::hacker_news(),
        FeedKind::Reddit => FeedSource::reddit_technology(),
    }
}

fn map_entry(entry: FeedEntry) -> FeedItem {
    FeedItem {
        title: entry.title,
        target: entry.href,
    }
}

fn map_content(content: ExtractedContent) -> PageData {
    PageData {
        title: content.title,
        chunks: content.chunks,
        links: content
            .links
            .into_iter()
            .map(|link| Link {
                url: link.url,
                text: link.text,
            })
            .collect(),
    }
}

/// Engine failure kinds collapse to the handful of cases the session shows differently.
fn map_failure(err: &FetchError) -> FetchFailure {
    match &err.kind {
        FailureKind::InvalidUrl => FetchFailure::Validation("Invalid URL format".to_string()),
        FailureKind::Connect | FailureKind::Network => FetchFailure::Transport,
        FailureKind::Timeout => FetchFailure::Timeout,
        FailureKind::HttpStatus(code) => FetchFailure::HttpStatus(*code),
        FailureKind::RedirectLimitExceeded => FetchFailure::Other("Too many redirects".to_string()),
        FailureKind::TooLarge { .. } => FetchFailure::Other("Page too large".to_string()),
        FailureKind::UnsupportedContentType { .. } => {
            FetchFailure::Other("Not a text page".to_string())
        }
        FailureKind::NoItems => FetchFailure::Other("No stories found".to_string()),
        FailureKind::Cancelled => FetchFailure::Other("Cancelled".to_string()),
        FailureKind::ProcessingError => FetchFailure::Other(err.message.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kinds_map_to_session_failures() {
        let cases = [
            (FailureKind::Timeout, FetchFailure::Timeout),
            (FailureKind::Connect, FetchFailure::Transport),
            (FailureKind::Network, FetchFailure::Transport),
            (FailureKind::HttpStatus(404), FetchFailure::HttpStatus(404)),
            (
                FailureKind::NoItems,
                FetchFailure::Other("No stories found".to_string()),
            ),
            (
                FailureKind::InvalidUrl,
                FetchFailure::Validation("Invalid URL format".to_string()),
            ),
        ];
        for (kind, expected) in cases {
            assert_eq!(map_failure(&FetchError::new(kind, "x")), expected);
        }
    }
}
