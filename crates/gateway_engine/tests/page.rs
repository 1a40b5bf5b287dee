use std::sync::Arc;

use gateway_engine::{
    FailureKind, FetchSettings, PageFetcher, ReadabilityLikeExtractor, ReqwestFetcher,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_fetcher() -> PageFetcher {
    PageFetcher::new(
        Arc::new(ReqwestFetcher::new(FetchSettings::default())),
        Arc::new(ReadabilityLikeExtractor),
    )
}

#[tokio::test]
async fn page_is_reduced_to_title_chunks_and_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><head><title>Wikipedia</title></head><body>
                <p>Wikipedia is a free online encyclopedia.</p>
                <p>It is written collaboratively by volunteers.</p>
                <p>Anyone can edit most of its articles.</p>
                <a href="/wiki/Help">Help</a>
            </body></html>"#,
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let page = page_fetcher()
        .fetch(&format!("{}/wiki", server.uri()))
        .await
        .expect("page");
    assert_eq!(page.title.as_deref(), Some("Wikipedia"));
    assert_eq!(page.chunks.len(), 3);
    assert_eq!(page.links.len(), 1);
    assert_eq!(page.links[0].url, format!("{}/wiki/Help", server.uri()));
}

#[tokio::test]
async fn links_resolve_against_the_redirect_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/docs/index.html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/index.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="intro.html">Intro</a>"#, "text/html"),
        )
        .mount(&server)
        .await;

    let page = page_fetcher()
        .fetch(&format!("{}/start", server.uri()))
        .await
        .expect("page");
    assert_eq!(page.links[0].url, format!("{}/docs/intro.html", server.uri()));
}

#[tokio::test]
async fn non_web_urls_are_refused_before_any_request() {
    let err = page_fetcher().fetch("ftp://example.com/file").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);

    let err = page_fetcher().fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
