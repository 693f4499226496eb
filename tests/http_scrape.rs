use paged_scrape::crawlers::{HttpFetcher, PageFetcher};
use paged_scrape::{ExtractMode, FetchError, ScrapeRequest, Scraper, SessionStatus, StopReason};
use std::ops::ControlFlow;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing(items: &[&str]) -> String {
    let rows: String = items
        .iter()
        .map(|i| format!("<div class=\"quote\"><span class=\"text\">{i}</span></div>"))
        .collect();
    format!("<html><body>{rows}</body></html>")
}

async fn mount_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn continue_all(_: paged_scrape::ProgressEvent) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

#[tokio::test]
async fn test_scrapes_until_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, "1", listing(&["one", "two"])).await;
    mount_page(&server, "2", listing(&["three"])).await;
    mount_page(&server, "3", listing(&[])).await;

    let request = ScrapeRequest::new(
        format!("{}/quotes?page={{page}}", server.uri()),
        "span.text",
        ExtractMode::Text,
    );
    let session = Scraper::new(request).run(continue_all).await.unwrap();

    assert_eq!(session.items, vec!["one", "two", "three"]);
    assert_eq!(session.pages_visited, 3);
    assert_eq!(session.status, SessionStatus::Completed(StopReason::EmptyPage));
}

#[tokio::test]
async fn test_server_error_fails_session() {
    let server = MockServer::start().await;
    mount_page(&server, "1", listing(&["kept"])).await;
    Mock::given(method("GET"))
        .and(path("/quotes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let request = ScrapeRequest::new(
        format!("{}/quotes?page={{page}}", server.uri()),
        "span.text",
        ExtractMode::Text,
    );
    let session = Scraper::new(request).run(continue_all).await.unwrap();

    assert_eq!(session.items, vec!["kept"]);
    match session.error() {
        Some(FetchError::Status { status, url }) => {
            assert_eq!(*status, 503);
            assert!(url.ends_with("page=2"));
        }
        other => panic!("unexpected status: {:?}", other),
    }
}

#[tokio::test]
async fn test_static_url_hits_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<a href=\"/x\">x</a><img src=\"/logo.png\">",
        ))
        .expect(4)
        .mount(&server)
        .await;

    let request = ScrapeRequest::new(format!("{}/static", server.uri()), "img", ExtractMode::Image);
    let session = Scraper::new(request)
        .with_max_pages(4)
        .run(continue_all)
        .await
        .unwrap();

    assert_eq!(session.items, vec!["/logo.png"; 4]);
    assert_eq!(session.stop_reason(), Some(StopReason::PageLimit));
    server.verify().await;
}

#[tokio::test]
async fn test_fetcher_rejects_invalid_url() {
    let config = paged_scrape::ScraperConfig::new("not a url", "p", ExtractMode::Text);
    let fetcher = HttpFetcher::new(&config).unwrap();

    let err = fetcher.fetch_page("not a url").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn test_fetcher_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>late</p>")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = paged_scrape::ScraperConfig::new(&server.uri(), "p", ExtractMode::Text);
    let fetcher = HttpFetcher::new(&paged_scrape::ScraperConfig {
        timeout_secs: 1,
        ..config
    })
    .unwrap();

    let err = fetcher.fetch_page(&server.uri()).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = paged_scrape::ScraperConfig::new("http://127.0.0.1:1/", "p", ExtractMode::Text);
    let fetcher = HttpFetcher::new(&config).unwrap();

    let err = fetcher.fetch_page("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {:?}", err);
    assert!(err.to_string().contains("127.0.0.1:1"));
}
