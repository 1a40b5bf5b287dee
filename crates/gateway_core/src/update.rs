use crate::render::{self, Screen, MENU_PROMPT};
use crate::state::PendingKind;
use crate::url_input::{resolve_target, validate_url};
use crate::{Effect, FeedKind, FetchFailure, Msg, PageData, ScreenKind, SessionState};

/// A trimmed input line, classified once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Menu,
    NewUrl,
    Next,
    Prev,
    Back,
    Number(usize),
    Other,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.to_ascii_uppercase().as_str() {
            "M" => Command::Menu,
            "U" => Command::NewUrl,
            "N" => Command::Next,
            "P" => Command::Prev,
            "B" => Command::Back,
            // Numbers too large for usize are still numbers, just out of range.
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Command::Number(digits.parse().unwrap_or(usize::MAX))
            }
            _ => Command::Other,
        }
    }
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::Connected => {
            let had_pending = state.pending().is_some();
            state = state.reset_for_connection();
            let mut effects = cancel_if(had_pending);
            effects.push(Effect::Show(render::main_menu()));
            effects
        }
        Msg::Disconnected => {
            let had_pending = state.pending().is_some();
            state.disconnect();
            cancel_if(had_pending)
        }
        Msg::Input(line) => {
            if state.is_connected() {
                handle_input(&mut state, line.trim())
            } else {
                Vec::new()
            }
        }
        Msg::FeedLoaded {
            request,
            feed,
            items,
        } => match state.settle(request) {
            Some(PendingKind::Feed(pending)) if pending == feed => {
                state.store_feed(feed, items);
                state.go_to(ScreenKind::Feed(feed));
                show_current(&state)
            }
            _ => Vec::new(),
        },
        Msg::FeedFailed {
            request,
            feed,
            failure,
        } => match state.settle(request) {
            Some(PendingKind::Feed(pending)) if pending == feed => {
                state.go_to(ScreenKind::Main);
                vec![Effect::Show(render::error_to_menu(&failure.to_string()))]
            }
            _ => Vec::new(),
        },
        Msg::PageLoaded { request, page } => match state.settle(request) {
            Some(PendingKind::Page { url }) => enter_page(&mut state, url, page),
            _ => Vec::new(),
        },
        Msg::PageFailed { request, failure } => match state.settle(request) {
            Some(PendingKind::Page { .. }) => page_failed(&mut state, &failure),
            _ => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn handle_input(state: &mut SessionState, line: &str) -> Vec<Effect> {
    let command = Command::parse(line);
    match (state.screen(), command) {
        (ScreenKind::AwaitingUrl, Command::Menu) => go_main(state),
        (ScreenKind::AwaitingUrl, _) => fetch_page(state, line),

        (_, Command::Menu) => go_main(state),
        (_, Command::NewUrl) => prompt_for_url(state),

        (ScreenKind::Main, Command::Number(1)) => fetch_feed(state, FeedKind::HackerNews),
        (ScreenKind::Main, Command::Number(2)) => fetch_feed(state, FeedKind::Reddit),
        (ScreenKind::Main, Command::Number(3)) => prompt_for_url(state),
        (ScreenKind::Main, Command::Number(4)) => vec![Effect::Show(render::help())],
        (ScreenKind::Main, _) => notice(&["Invalid option"]),

        (ScreenKind::Feed(feed), Command::Number(number)) => select_feed_item(state, feed, number),
        (ScreenKind::Feed(feed), Command::Next | Command::Prev) => {
            let len = state.feed_items(feed).len();
            state.step_list_page(len, command == Command::Next);
            show_current(state)
        }
        (ScreenKind::Feed(_), Command::Back | Command::Other) => {
            notice(&["Enter number, N/P, or M"])
        }

        (ScreenKind::PageContent, Command::Next) => next_content(state),
        (ScreenKind::PageContent, Command::Prev) => {
            state.set_cursor(state.page_cursor().saturating_sub(1));
            show_current(state)
        }
        (ScreenKind::PageContent, Command::Number(_)) => {
            notice(&["Viewing content", "Use N/P to navigate"])
        }
        (ScreenKind::PageContent, Command::Back) => notice(&["Already viewing content"]),
        (ScreenKind::PageContent, Command::Other) => notice(&["Enter #, N/P, B, U, or M"]),

        (ScreenKind::PageLinks, Command::Number(number)) => select_link(state, number),
        (ScreenKind::PageLinks, Command::Next | Command::Prev) => {
            let len = state.page_links().len();
            state.step_list_page(len, command == Command::Next);
            show_current(state)
        }
        (ScreenKind::PageLinks, Command::Back) => {
            state.go_to(ScreenKind::PageContent);
            show_page(state)
        }
        (ScreenKind::PageLinks, Command::Other) => notice(&["Enter #, N/P, B, U, or M"]),
    }
}

fn go_main(state: &mut SessionState) -> Vec<Effect> {
    let mut effects = cancel_if(state.abandon_fetch());
    state.go_to(ScreenKind::Main);
    effects.push(Effect::Show(render::main_menu()));
    effects
}

fn prompt_for_url(state: &mut SessionState) -> Vec<Effect> {
    let mut effects = cancel_if(state.abandon_fetch());
    state.go_to(ScreenKind::AwaitingUrl);
    effects.push(Effect::Show(render::url_prompt()));
    effects
}

fn fetch_feed(state: &mut SessionState, feed: FeedKind) -> Vec<Effect> {
    let request = state.begin_fetch(PendingKind::Feed(feed));
    vec![
        Effect::Show(Screen::notice(&[feed.fetching_notice()], "")),
        Effect::FetchFeed { request, feed },
    ]
}

/// Validates `candidate` and starts a page fetch, or re-prompts for a URL.
fn fetch_page(state: &mut SessionState, candidate: &str) -> Vec<Effect> {
    match validate_url(candidate) {
        Ok(url) => {
            let request = state.begin_fetch(PendingKind::Page { url: url.clone() });
            vec![
                Effect::Show(Screen::notice(&["Fetching..."], "")),
                Effect::FetchPage { request, url },
            ]
        }
        Err(err) => {
            let mut effects = cancel_if(state.abandon_fetch());
            state.go_to(ScreenKind::AwaitingUrl);
            effects.push(Effect::Show(render::url_retry(
                &format!("Error: {err}"),
                "Try again or M for menu",
            )));
            effects
        }
    }
}

fn select_feed_item(state: &mut SessionState, feed: FeedKind, number: usize) -> Vec<Effect> {
    let target = number
        .checked_sub(1)
        .and_then(|index| state.feed_items(feed).get(index))
        .map(|item| item.target.clone());
    match target {
        Some(target) => match resolve_target(feed.base_url(), &target) {
            Some(url) => fetch_page(state, &url),
            None => notice(&["Story has no link"]),
        },
        None => notice(&["Invalid number"]),
    }
}

fn select_link(state: &mut SessionState, number: usize) -> Vec<Effect> {
    let url = number
        .checked_sub(1)
        .and_then(|index| state.page_links().get(index))
        .map(|link| link.url.clone());
    match url {
        Some(url) => fetch_page(state, &url),
        None => notice(&["Invalid link number"]),
    }
}

fn next_content(state: &mut SessionState) -> Vec<Effect> {
    let next = state.page_cursor() + 1;
    if next < state.page_content().len() {
        state.set_cursor(next);
        show_current(state)
    } else if !state.page_links().is_empty() {
        state.go_to(ScreenKind::PageLinks);
        show_current(state)
    } else {
        notice(&["(End of content)"])
    }
}

fn enter_page(state: &mut SessionState, url: String, page: PageData) -> Vec<Effect> {
    state.store_page(url, page);
    state.go_to(ScreenKind::PageContent);
    show_page(state)
}

/// Shows page content; a page without usable text goes straight to its links.
fn show_page(state: &mut SessionState) -> Vec<Effect> {
    let screen = render::current(state);
    if state.page_content().is_empty() {
        state.go_to(ScreenKind::PageLinks);
    }
    vec![Effect::Show(screen)]
}

fn page_failed(state: &mut SessionState, failure: &FetchFailure) -> Vec<Effect> {
    let screen = match failure {
        FetchFailure::Validation(reason) => {
            render::url_retry(&format!("Error: {reason}"), "Try again or M for menu")
        }
        FetchFailure::Timeout | FetchFailure::HttpStatus(_) => {
            render::url_retry(&failure.to_string(), "Try again or M for menu")
        }
        FetchFailure::Transport => {
            render::url_retry(&failure.to_string(), "Check URL or M for menu")
        }
        FetchFailure::Other(message) => {
            state.go_to(ScreenKind::Main);
            return vec![Effect::Show(render::error_to_menu(message))];
        }
    };
    state.go_to(ScreenKind::AwaitingUrl);
    vec![Effect::Show(screen)]
}

fn show_current(state: &SessionState) -> Vec<Effect> {
    vec![Effect::Show(render::current(state))]
}

fn notice(lines: &[&str]) -> Vec<Effect> {
    vec![Effect::Show(Screen::notice(lines, MENU_PROMPT))]
}

fn cancel_if(had_pending: bool) -> Vec<Effect> {
    if had_pending {
        vec![Effect::CancelFetch]
    } else {
        Vec::new()
    }
}
