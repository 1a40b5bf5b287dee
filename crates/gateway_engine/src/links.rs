use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::extract::normalize_text;
use crate::ExtractedLink;

const MAX_LINK_TEXT_CHARS: usize = 40;

/// Collects up to `max_links` unique absolute links in document order.
///
/// Fragment-only and `javascript:` hrefs are skipped; when the same target
/// appears twice the first anchor's text is kept.
pub fn extract_links(doc: &Html, base_url: &str, max_links: usize) -> Vec<ExtractedLink> {
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    let base = Url::parse(base_url).ok();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    // Detached boilerplate is still in the arena; walk from the root to skip it.
    for element in doc.root_element().select(&anchor) {
        if links.len() >= max_links {
            break;
        }
        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if !is_followable(href) {
            continue;
        }
        let Some(url) = resolve(base.as_ref(), href) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }

        let text = normalize_text(element.text());
        let text = if text.is_empty() { href.to_string() } else { text };
        links.push(ExtractedLink {
            url,
            text: text.chars().take(MAX_LINK_TEXT_CHARS).collect(),
        });
    }

    links
}

fn is_followable(href: &str) -> bool {
    !href.is_empty()
        && !href.starts_with('#')
        && !href
            .get(..11)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
}

fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    let joined = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    Some(joined.to_string())
}
