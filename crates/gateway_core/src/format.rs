//! Fixed-width text helpers for the device display.
//!
//! Everything here is a pure function of its inputs. Widths and lengths are
//! counted in `char`s; after [`to_display_ascii`] that is the same as bytes.

use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Display width of the device, in columns.
pub const DISPLAY_WIDTH: usize = 30;

/// Rows shown per paginated list page.
pub const ITEMS_PER_PAGE: usize = 5;

/// Greedy word wrap without continuation indent.
///
/// Whitespace runs collapse to a single space. Words longer than `width` are
/// broken into `width`-sized pieces. An empty or blank `text` produces no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return Vec::new();
    }
    let options = Options::new(width.max(1))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .break_words(true);
    textwrap::wrap(&collapsed, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// Zero-based index of `items[0]` within the full list.
    pub first_index: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> PageSlice<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slices `items[page * per_page .. page * per_page + per_page]`.
///
/// Out-of-range pages yield an empty slice; callers clamp with [`clamp_page`]
/// first. An empty list has `total_pages == 0`.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> PageSlice<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let start = page.saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());

    PageSlice {
        items: &items[start..end],
        first_index: start,
        page,
        total_pages,
        has_prev: page > 0,
        has_next: end < items.len(),
    }
}

/// Clamps `page` into `[0, last page]` for a list of `len` items.
pub fn clamp_page(len: usize, page: usize, per_page: usize) -> usize {
    let total_pages = len.div_ceil(per_page.max(1));
    page.min(total_pages.saturating_sub(1))
}

/// Keeps at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Maps text onto the ASCII range the device can show.
///
/// Common typographic characters and Latin-1 letters are transliterated,
/// control characters become spaces, anything else is dropped.
pub fn to_display_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(if ch.is_ascii_control() { ' ' } else { ch });
            continue;
        }
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' | '\u{00B4}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' | '\u{00AB}' | '\u{00BB}' => {
                out.push('"')
            }
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' => out.push(' '),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{00D7}' => out.push('x'),
            '\u{00A9}' => out.push_str("(c)"),
            '\u{00AE}' => out.push_str("(R)"),
            '\u{2122}' => out.push_str("TM"),
            '\u{00DF}' => out.push_str("ss"),
            '\u{00C6}' => out.push_str("AE"),
            '\u{00E6}' => out.push_str("ae"),
            other => {
                if let Some(base) = latin1_base_letter(other) {
                    out.push(base);
                }
            }
        }
    }
    out
}

fn latin1_base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
    }

    #[test]
    fn wrap_force_breaks_long_words() {
        let lines = wrap("a abcdefghijkl b", 5);
        assert_eq!(lines, vec!["a", "abcde", "fghij", "kl b"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap("   \t ", 30).is_empty());
    }

    #[test]
    fn clamp_page_handles_empty_and_overflow() {
        assert_eq!(clamp_page(0, 3, 5), 0);
        assert_eq!(clamp_page(10, 7, 5), 1);
        assert_eq!(clamp_page(11, 2, 5), 2);
    }

    #[test]
    fn paginate_empty_list_has_no_pages() {
        let empty: [u8; 0] = [];
        let slice = paginate(&empty, 0, 5);
        assert!(slice.is_empty());
        assert_eq!(slice.total_pages, 0);
        assert!(!slice.has_prev);
        assert!(!slice.has_next);
    }

    #[test]
    fn display_ascii_transliterates_typography() {
        assert_eq!(
            to_display_ascii("\u{201C}Caf\u{00E9}\u{201D} \u{2014} it\u{2019}s\u{2026}"),
            "\"Cafe\" - it's..."
        );
        assert_eq!(to_display_ascii("tab\there"), "tab here");
        assert_eq!(to_display_ascii("\u{65E5}\u{672C}ok"), "ok");
    }
}
