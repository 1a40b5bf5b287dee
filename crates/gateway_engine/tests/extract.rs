use gateway_engine::{
    chunk_words, decode_html, Extractor, ReadabilityLikeExtractor, MAX_CHUNK_CHARS, MAX_LINKS,
};
use pretty_assertions::assert_eq;

const BASE: &str = "https://example.com/articles/one";

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.html, "café");
    assert!(!decoded.had_errors);
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html"));
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn title_and_paragraphs_become_chunks() {
    let html = r#"
    <html><head><title>  Sample
        Page </title></head>
    <body>
        <p>The first paragraph has plenty of words.</p>
        <p>A second paragraph that is also long enough.</p>
        <p>The third paragraph rounds out the article.</p>
    </body></html>
    "#;
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.title.as_deref(), Some("Sample Page"));
    assert_eq!(
        extracted.chunks,
        vec![
            "The first paragraph has plenty of words.",
            "A second paragraph that is also long enough.",
            "The third paragraph rounds out the article.",
        ]
    );
}

#[test]
fn short_paragraphs_are_dropped() {
    let html = "<body><p>Share</p><p>This one is comfortably over the limit.</p></body>";
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.chunks, vec!["This one is comfortably over the limit."]);
}

#[test]
fn article_wins_over_surrounding_body() {
    let html = r#"
    <body>
        <p>Sidebar text that should not be part of the article.</p>
        <article><p>Article text that is what the reader wanted.</p></article>
    </body>
    "#;
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.chunks, vec!["Article text that is what the reader wanted."]);
}

#[test]
fn content_div_is_used_when_no_article_or_main() {
    let html = r#"
    <body>
        <div class="sidebar"><p>Popular elsewhere on the site this week.</p></div>
        <div class="Post-Content"><p>The actual post body lives in here.</p></div>
    </body>
    "#;
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.chunks, vec!["The actual post body lives in here."]);
}

#[test]
fn boilerplate_is_stripped_before_extraction() {
    let html = r#"
    <html><head><style>p { color: red }</style></head>
    <body>
        <header><p>Site header with a long enough tagline.</p></header>
        <nav><a href="/home">Home</a></nav>
        <script>var paragraphs = "<p>not content at all here</p>";</script>
        <p>Only this paragraph belongs to the page.</p>
        <footer><a href="/about">About</a></footer>
    </body></html>
    "#;
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.chunks, vec!["Only this paragraph belongs to the page."]);
    assert!(extracted.links.is_empty());
}

#[test]
fn article_inside_stripped_header_is_ignored() {
    let html = r#"
    <html><body>
        <header><article><p>Header article paragraph that is long enough.</p></article></header>
        <nav><a href="/home">Home</a></nav>
        <p>The real body paragraph is what remains.</p>
        <a href="/story">Story</a>
        <footer><a href="/about">About</a></footer>
    </body></html>
    "#;
    let extracted = ReadabilityLikeExtractor.extract(html, BASE);
    assert_eq!(extracted.chunks, vec!["The real body paragraph is what remains."]);
    let urls: Vec<_> = extracted.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["https://example.com/story"]);
}

#[test]
fn text_without_paragraphs_is_split_on_words() {
    let sentence = "lorem ipsum dolor sit amet ".repeat(20);
    let html = format!("<body><div>{sentence}</div></body>");
    let extracted = ReadabilityLikeExtractor.extract(&html, BASE);

    assert!(extracted.chunks.len() > 1);
    assert!(extracted
        .chunks
        .iter()
        .all(|chunk| chunk.chars().count() <= MAX_CHUNK_CHARS));
    assert_eq!(extracted.chunks.join(" "), sentence.trim());
}

#[test]
fn chunk_words_preserves_word_order() {
    let text = "one two three four five six seven eight nine ten";
    let chunks = chunk_words(text, 12);
    assert_eq!(chunks.join(" "), text);
    assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 12));
}

#[test]
fn empty_document_yields_nothing() {
    let extracted = ReadabilityLikeExtractor.extract("", BASE);
    assert_eq!(extracted.title, None);
    assert!(extracted.chunks.is_empty());
    assert!(extracted.links.is_empty());
}

#[test]
fn long_titles_are_truncated() {
    let title = "T".repeat(90);
    let html = format!("<title>{title}</title><p>Some body text long enough to keep.</p>");
    let extracted = ReadabilityLikeExtractor.extract(&html, BASE);
    assert_eq!(extracted.title.map(|t| t.chars().count()), Some(40));
}

#[test]
fn links_are_capped() {
    let anchors: String = (0..50)
        .map(|i| format!("<a href=\"/page/{i}\">Page {i}</a>"))
        .collect();
    let html = format!("<body>{anchors}</body>");
    let extracted = ReadabilityLikeExtractor.extract(&html, BASE);
    assert_eq!(extracted.links.len(), MAX_LINKS);
    assert_eq!(extracted.links[0].url, "https://example.com/page/0");
}
