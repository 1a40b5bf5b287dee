use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::links::extract_links;
use crate::ExtractedContent;

/// Elements whose text never counts as readable content.
const NOISE_SELECTOR: &str = "script, style, nav, footer, header, iframe";
const MAIN_CLASS_HINTS: [&str; 4] = ["content", "article", "post", "entry"];
const MAX_TITLE_CHARS: usize = 40;
const MIN_PARAGRAPH_CHARS: usize = 20;
pub const MAX_CHUNK_CHARS: usize = 200;
pub const MAX_LINKS: usize = 20;

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, base_url: &str) -> ExtractedContent;
}

/// Lightweight "readability-like" extractor:
/// - drops boilerplate elements from the tree
/// - picks `<article>`, `<main>`, a content-ish `<div>` or `<body>`
/// - keeps paragraphs long enough to be prose
/// - falls back to word-wrapped chunks of the flattened text when there are no paragraphs.
#[derive(Debug, Default)]
pub struct ReadabilityLikeExtractor;

impl Extractor for ReadabilityLikeExtractor {
    fn extract(&self, html: &str, base_url: &str) -> ExtractedContent {
        let mut doc = Html::parse_document(html);
        strip_noise(&mut doc);

        let title = select_first(&doc, "title")
            .map(|node| normalize_text(node.text()))
            .filter(|t| !t.is_empty())
            .map(|t| t.chars().take(MAX_TITLE_CHARS).collect());

        let chunks = main_node(&doc).map(content_chunks).unwrap_or_default();
        let links = extract_links(&doc, base_url, MAX_LINKS);

        ExtractedContent {
            title,
            chunks,
            links,
        }
    }
}

fn strip_noise(doc: &mut Html) {
    let Ok(selector) = Selector::parse(NOISE_SELECTOR) else {
        return;
    };
    let ids: Vec<NodeId> = doc.select(&selector).map(|node| node.id()).collect();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Document-level queries start from the root element so detached nodes are never visited.
fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    doc.root_element().select(&selector).next()
}

fn main_node(doc: &Html) -> Option<ElementRef<'_>> {
    select_first(doc, "article")
        .or_else(|| select_first(doc, "main"))
        .or_else(|| content_div(doc))
        .or_else(|| select_first(doc, "body"))
}

fn content_div(doc: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("div[class]").ok()?;
    doc.root_element().select(&selector).find(|div| {
        let class = div.value().attr("class").unwrap_or_default().to_ascii_lowercase();
        MAIN_CLASS_HINTS.iter().any(|hint| class.contains(hint))
    })
}

fn content_chunks(main: ElementRef<'_>) -> Vec<String> {
    let Ok(paragraph) = Selector::parse("p") else {
        return Vec::new();
    };
    let paragraphs: Vec<ElementRef<'_>> = main.select(&paragraph).collect();
    if paragraphs.is_empty() {
        return chunk_words(&normalize_text(main.text()), MAX_CHUNK_CHARS);
    }
    paragraphs
        .into_iter()
        .map(|p| normalize_text(p.text()))
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect()
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts {
        for word in part.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}

/// Splits text into chunks of at most `max_chars`, breaking between words.
///
/// A single word longer than `max_chars` becomes its own chunk.
pub fn chunk_words(text: &str, max_chars: usize) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let options = Options::new(max_chars.max(1))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .break_words(false);
    textwrap::wrap(&collapsed, options)
        .into_iter()
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.into_owned())
        .collect()
}
