use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::extract::ReadabilityLikeExtractor;
use crate::feeds::FeedFetcher;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::page::PageFetcher;
use crate::{EngineEvent, FailureKind, FetchError, Job};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub feed: FetchSettings,
    pub page: FetchSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed: FetchSettings::for_feeds(),
            page: FetchSettings::default(),
        }
    }
}

enum EngineCommand {
    Submit(Job),
    Cancel,
}

struct Pipelines {
    feeds: FeedFetcher,
    pages: PageFetcher,
}

/// Runs fetch jobs on a background runtime, one at a time.
///
/// Submitting a job cancels whatever was still running, so at most one
/// result is ever outstanding. Events come back through [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> io::Result<Self> {
        Self::with_fetchers(
            Arc::new(ReqwestFetcher::new(config.feed)),
            Arc::new(ReqwestFetcher::new(config.page)),
        )
    }

    pub fn with_fetchers(feed: Arc<dyn Fetcher>, page: Arc<dyn Fetcher>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let pipelines = Arc::new(Pipelines {
            feeds: FeedFetcher::new(feed),
            pages: PageFetcher::new(page, Arc::new(ReadabilityLikeExtractor)),
        });
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("gateway-engine".to_string())
            .spawn(move || {
                let mut current: Option<CancellationToken> = None;
                while let Ok(command) = cmd_rx.recv() {
                    if let Some(token) = current.take() {
                        token.cancel();
                    }
                    let EngineCommand::Submit(job) = command else {
                        continue;
                    };
                    let token = CancellationToken::new();
                    current = Some(token.clone());
                    let pipelines = pipelines.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = tokio::select! {
                            _ = token.cancelled() => cancelled(&job),
                            event = run_job(&pipelines, &job) => event,
                        };
                        let _ = event_tx.send(event);
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, job: Job) {
        gateway_logging::gateway_debug!("Submitting fetch #{}", job.request());
        let _ = self.cmd_tx.send(EngineCommand::Submit(job));
    }

    pub fn cancel(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_job(pipelines: &Pipelines, job: &Job) -> EngineEvent {
    match job {
        Job::FetchFeed { request, source } => EngineEvent::FeedFetched {
            request: *request,
            result: pipelines.feeds.fetch(source).await,
        },
        Job::FetchPage { request, url } => EngineEvent::PageFetched {
            request: *request,
            result: pipelines.pages.fetch(url).await,
        },
    }
}

fn cancelled(job: &Job) -> EngineEvent {
    let error = FetchError::new(FailureKind::Cancelled, "superseded");
    match job {
        Job::FetchFeed { request, .. } => EngineEvent::FeedFetched {
            request: *request,
            result: Err(error),
        },
        Job::FetchPage { request, .. } => EngineEvent::PageFetched {
            request: *request,
            result: Err(error),
        },
    }
}
