use gateway_engine::{extract_links, ExtractedLink};
use pretty_assertions::assert_eq;
use scraper::Html;

const BASE: &str = "https://en.wikipedia.org/wiki/Main_Page";

fn links_of(html: &str) -> Vec<ExtractedLink> {
    extract_links(&Html::parse_document(html), BASE, 20)
}

#[test]
fn relative_links_resolve_against_the_page() {
    let links = links_of(r#"<a href="/wiki/Rust">Rust</a><a href="Ferris">Crab</a>"#);
    assert_eq!(
        links,
        vec![
            ExtractedLink {
                url: "https://en.wikipedia.org/wiki/Rust".to_string(),
                text: "Rust".to_string(),
            },
            ExtractedLink {
                url: "https://en.wikipedia.org/wiki/Ferris".to_string(),
                text: "Crab".to_string(),
            },
        ]
    );
}

#[test]
fn duplicates_keep_the_first_occurrence() {
    let links = links_of(
        r#"<a href="/a">First</a><a href="https://en.wikipedia.org/a">Again</a><a href="/b">B</a>"#,
    );
    let texts: Vec<_> = links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["First", "B"]);
}

#[test]
fn dedupe_is_idempotent() {
    let html = r#"<a href="/x">X</a><a href="/y">Y</a><a href="/x">X2</a>"#;
    let once = links_of(html);
    let rebuilt: String = once
        .iter()
        .map(|l| format!("<a href=\"{}\">{}</a>", l.url, l.text))
        .collect();
    assert_eq!(links_of(&rebuilt), once);
}

#[test]
fn fragments_scripts_and_empty_hrefs_are_skipped() {
    let links = links_of(
        r##"<a href="#top">Top</a><a href="javascript:go()">Go</a><a href="">Empty</a><a>None</a><a href="/ok">Ok</a>"##,
    );
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://en.wikipedia.org/ok");
}

#[test]
fn empty_text_falls_back_to_href() {
    let links = links_of(r#"<a href="/img"><img src="x.png"></a>"#);
    assert_eq!(links[0].text, "/img");
}

#[test]
fn link_text_is_normalized_and_truncated() {
    let long = "word ".repeat(20);
    let links = links_of(&format!("<a href=\"/long\">\n  {long}\n</a>"));
    assert_eq!(links[0].text.chars().count(), 40);
    assert!(!links[0].text.contains("  "));
}

#[test]
fn cap_limits_results() {
    let html: String = (0..10).map(|i| format!("<a href=\"/{i}\">{i}</a>")).collect();
    let links = extract_links(&Html::parse_document(&html), BASE, 3);
    assert_eq!(links.len(), 3);
}
