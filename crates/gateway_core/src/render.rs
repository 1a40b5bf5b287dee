//! Screen rendering: a pure function of [`SessionState`].
//!
//! Screens are plain line lists; the transport writer appends CRLF to every
//! line and then writes the prompt without a line ending.

use crate::format::{paginate, to_display_ascii, truncate_chars, wrap, DISPLAY_WIDTH};
use crate::{FeedItem, FeedKind, Link, ScreenKind, SessionState};

/// Longest status message shown after an error.
pub const MAX_MESSAGE_CHARS: usize = 40;

pub const MENU_PROMPT: &str = "> ";
pub const URL_PROMPT: &str = "URL> ";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub lines: Vec<String>,
    pub prompt: String,
}

impl Screen {
    fn new(prompt: &str) -> Self {
        Self {
            lines: Vec::new(),
            prompt: prompt.to_string(),
        }
    }

    /// A short status message preceded by a blank line.
    pub fn notice(lines: &[&str], prompt: &str) -> Self {
        let mut screen = Self::new(prompt);
        screen.blank();
        screen.lines.extend(lines.iter().map(|line| line.to_string()));
        screen
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn wrapped(&mut self, text: &str) {
        self.lines.extend(wrap(&to_display_ascii(text), DISPLAY_WIDTH));
    }

    fn append(&mut self, other: Screen) {
        self.lines.extend(other.lines);
        self.prompt = other.prompt;
    }

    /// The separate writes that make up this screen: each line with its CRLF,
    /// then the prompt when there is one.
    pub fn wire_chunks(&self) -> Vec<String> {
        let mut chunks: Vec<String> = self.lines.iter().map(|line| format!("{line}\r\n")).collect();
        if !self.prompt.is_empty() {
            chunks.push(self.prompt.clone());
        }
        chunks
    }

    /// The full text as written to the device.
    pub fn to_wire_text(&self) -> String {
        self.wire_chunks().concat()
    }
}

/// Renders whatever `state.screen()` says is active.
pub fn current(state: &SessionState) -> Screen {
    match state.screen() {
        ScreenKind::Main => main_menu(),
        ScreenKind::AwaitingUrl => url_prompt(),
        ScreenKind::Feed(feed) => feed_list(state, feed),
        ScreenKind::PageContent => page_content(state),
        ScreenKind::PageLinks => page_links(state),
    }
}

pub fn main_menu() -> Screen {
    let mut screen = Screen::new(MENU_PROMPT);
    screen.blank();
    screen.line("=== GAME.COM GATEWAY ===");
    screen.line("1997 -> 2025 Portal");
    screen.blank();
    screen.line("1. Hacker News");
    screen.line("2. Reddit r/technology");
    screen.line("3. Enter URL");
    screen.line("4. Help");
    screen.blank();
    screen
}

pub fn help() -> Screen {
    let mut screen = Screen::new(MENU_PROMPT);
    screen.blank();
    screen.line("=== HELP ===");
    screen.line("Type menu numbers");
    screen.line("M = main menu");
    screen.line("U = enter new URL");
    screen.line("# = follow link");
    screen.line("N/P = next/prev page");
    screen.blank();
    screen
}

pub fn url_prompt() -> Screen {
    let mut screen = Screen::new(URL_PROMPT);
    screen.blank();
    screen.line("=== ENTER URL ===");
    screen.line("Examples:");
    screen.line("  wikipedia.org");
    screen.line("  bbc.com/news");
    screen.line("  nytimes.com");
    screen.blank();
    screen.line("Or M for main menu");
    screen
}

/// Error re-prompt that keeps the user at the URL prompt.
pub fn url_retry(message: &str, hint: &str) -> Screen {
    let message = truncate_chars(&to_display_ascii(message), MAX_MESSAGE_CHARS);
    Screen::notice(&[message.as_str(), hint], URL_PROMPT)
}

/// Error notice that sends the user back to the main menu.
pub fn error_to_menu(message: &str) -> Screen {
    let message = truncate_chars(
        &format!("Error: {}", to_display_ascii(message)),
        MAX_MESSAGE_CHARS,
    );
    Screen::notice(&[message.as_str(), "M. Main Menu"], MENU_PROMPT)
}

fn feed_list(state: &SessionState, feed: FeedKind) -> Screen {
    let mut screen = Screen::new(MENU_PROMPT);
    screen.blank();
    screen.line(feed.heading());
    paged_rows(&mut screen, state, state.feed_items(feed), feed_row);
    screen.line("Enter # to read");
    screen.line("M. Main Menu");
    screen
}

fn page_content(state: &SessionState) -> Screen {
    let chunks = state.page_content();
    if chunks.is_empty() {
        let mut screen = Screen::notice(&["No content available"], MENU_PROMPT);
        screen.append(page_links(state));
        return screen;
    }

    let cursor = state.page_cursor().min(chunks.len() - 1);
    let mut screen = Screen::new(MENU_PROMPT);
    screen.blank();
    if cursor == 0 {
        if let Some(title) = state.page_title() {
            screen.wrapped(&format!("=== {title} ==="));
            screen.blank();
        }
    }
    screen.line(format!("Content {}/{}", cursor + 1, chunks.len()));
    screen.blank();
    screen.wrapped(&chunks[cursor]);
    screen.blank();

    if cursor + 1 < chunks.len() {
        screen.line("N. Next");
    } else if state.page_links().is_empty() {
        screen.line("(End of content)");
    } else {
        screen.line("N. View Links");
    }
    if cursor > 0 {
        screen.line("P. Previous");
    }
    screen.line("U. New URL  M. Menu");
    screen
}

fn page_links(state: &SessionState) -> Screen {
    let links = state.page_links();
    if links.is_empty() {
        return Screen::notice(&["No links found", "U. New URL  M. Menu"], MENU_PROMPT);
    }

    let mut screen = Screen::new(MENU_PROMPT);
    screen.blank();
    screen.line("--- LINKS ---");
    screen.line(format!("{} links found", links.len()));
    paged_rows(&mut screen, state, links, link_row);
    screen.blank();
    screen.line("Enter # to follow");
    screen.line("B. Back to content");
    screen.line("U. New URL  M. Menu");
    screen
}

fn feed_row(number: usize, item: &FeedItem) -> String {
    format!("{number}. {}", item.title)
}

fn link_row(number: usize, link: &Link) -> String {
    format!("{number}. {}", link.text)
}

/// Writes one numbered page of `items` plus its navigation line.
fn paged_rows<T>(
    screen: &mut Screen,
    state: &SessionState,
    items: &[T],
    row: fn(usize, &T) -> String,
) {
    let slice = paginate(items, state.page_cursor(), state.items_per_page());
    screen.blank();
    if slice.is_empty() {
        screen.line("No items");
        screen.blank();
        return;
    }
    screen.line(format!("Page {}/{}", slice.page + 1, slice.total_pages));
    screen.blank();

    for (offset, item) in slice.items.iter().enumerate() {
        screen.wrapped(&row(slice.first_index + offset + 1, item));
        screen.blank();
    }

    let mut nav = Vec::new();
    if slice.has_prev {
        nav.push("P. Previous");
    }
    if slice.has_next {
        nav.push("N. Next");
    }
    if !nav.is_empty() {
        screen.line(nav.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_uses_crlf_and_trailing_prompt() {
        let screen = Screen::notice(&["Invalid option"], MENU_PROMPT);
        assert_eq!(screen.to_wire_text(), "\r\nInvalid option\r\n> ");
    }

    #[test]
    fn menu_lists_four_options() {
        let screen = main_menu();
        let options: Vec<&str> = screen
            .lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.len() > 2 && line.as_bytes()[1] == b'.')
            .collect();
        assert_eq!(
            options,
            vec![
                "1. Hacker News",
                "2. Reddit r/technology",
                "3. Enter URL",
                "4. Help"
            ]
        );
        assert_eq!(screen.prompt, "> ");
    }

    #[test]
    fn error_to_menu_truncates_long_messages() {
        let screen = error_to_menu(&"x".repeat(100));
        assert_eq!(screen.lines[1].chars().count(), MAX_MESSAGE_CHARS);
        assert!(screen.lines[1].starts_with("Error: "));
    }

    #[test]
    fn error_messages_are_ascii_for_the_device() {
        let screen = error_to_menu("Caf\u{00E9} \u{2013} \u{65E5}down");
        assert_eq!(screen.lines[1], "Error: Cafe - down");

        let screen = url_retry("Error: na\u{00EF}ve \u{201C}host\u{201D}", "Try again");
        assert_eq!(screen.lines[1], "Error: naive \"host\"");
        assert_eq!(screen.prompt, URL_PROMPT);
    }

    #[test]
    fn menu_lines_fit_the_display() {
        for screen in [main_menu(), help(), url_prompt()] {
            assert!(screen.lines.iter().all(|l| l.chars().count() <= DISPLAY_WIDTH));
        }
    }
}
