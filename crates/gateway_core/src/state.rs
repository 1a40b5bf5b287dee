use crate::format::{clamp_page, ITEMS_PER_PAGE};
use crate::{FeedItem, FeedKind, Link, PageData, RequestId};

/// The screen currently shown on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenKind {
    #[default]
    Main,
    Feed(FeedKind),
    PageContent,
    PageLinks,
    AwaitingUrl,
}

/// What the outstanding fetch will deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingKind {
    Feed(FeedKind),
    Page { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub request: RequestId,
    pub kind: PendingKind,
}

/// All per-connection state. Owned by the polling loop and threaded through
/// [`crate::update`] by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    connected: bool,
    screen: ScreenKind,
    page_cursor: usize,
    items_per_page: usize,
    current_url: Option<String>,
    page_title: Option<String>,
    hn_items: Vec<FeedItem>,
    reddit_items: Vec<FeedItem>,
    page_links: Vec<Link>,
    page_content: Vec<String>,
    pending: Option<PendingFetch>,
    next_request: RequestId,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            connected: false,
            screen: ScreenKind::Main,
            page_cursor: 0,
            items_per_page: ITEMS_PER_PAGE,
            current_url: None,
            page_title: None,
            hn_items: Vec::new(),
            reddit_items: Vec::new(),
            page_links: Vec::new(),
            page_content: Vec::new(),
            pending: None,
            next_request: 1,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn screen(&self) -> ScreenKind {
        self.screen
    }

    pub fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    pub fn feed_items(&self, feed: FeedKind) -> &[FeedItem] {
        match feed {
            FeedKind::HackerNews => &self.hn_items,
            FeedKind::Reddit => &self.reddit_items,
        }
    }

    pub fn page_links(&self) -> &[Link] {
        &self.page_links
    }

    pub fn page_content(&self) -> &[String] {
        &self.page_content
    }

    pub fn pending(&self) -> Option<&PendingFetch> {
        self.pending.as_ref()
    }

    /// Fresh state for a new connection. The request counter survives so that
    /// results of fetches started before the reset can never match.
    pub(crate) fn reset_for_connection(&self) -> Self {
        Self {
            connected: true,
            next_request: self.next_request,
            ..Self::default()
        }
    }

    pub(crate) fn disconnect(&mut self) {
        *self = Self {
            next_request: self.next_request,
            ..Self::default()
        };
    }

    pub(crate) fn go_to(&mut self, screen: ScreenKind) {
        self.screen = screen;
        self.page_cursor = 0;
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.page_cursor = cursor;
    }

    /// Moves the list cursor one page, clamped to the pages of a `len`-item list.
    pub(crate) fn step_list_page(&mut self, len: usize, forward: bool) {
        let requested = if forward {
            self.page_cursor.saturating_add(1)
        } else {
            self.page_cursor.saturating_sub(1)
        };
        self.page_cursor = clamp_page(len, requested, self.items_per_page);
    }

    pub(crate) fn begin_fetch(&mut self, kind: PendingKind) -> RequestId {
        let request = self.next_request;
        self.next_request += 1;
        self.pending = Some(PendingFetch { request, kind });
        request
    }

    /// Drops the outstanding fetch, returning whether there was one.
    pub(crate) fn abandon_fetch(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Claims the outstanding fetch if `request` is the one we are waiting for.
    pub(crate) fn settle(&mut self, request: RequestId) -> Option<PendingKind> {
        match &self.pending {
            Some(pending) if pending.request == request => {
                self.pending.take().map(|pending| pending.kind)
            }
            _ => None,
        }
    }

    pub(crate) fn store_feed(&mut self, feed: FeedKind, items: Vec<FeedItem>) {
        match feed {
            FeedKind::HackerNews => self.hn_items = items,
            FeedKind::Reddit => self.reddit_items = items,
        }
    }

    pub(crate) fn store_page(&mut self, url: String, page: PageData) {
        self.current_url = Some(url);
        self.page_title = page.title;
        self.page_content = page.chunks;
        self.page_links = page.links;
    }
}
