//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to serve listing pages over HTTP and run the
//! full fetch, parse and write cycle end-to-end.

use quote_harvest::config::{Config, HttpConfig, OutputConfig, SourceConfig, UserAgentConfig};
use quote_harvest::crawler::{fetch_all, fetch_all_with_config, StopReason};
use quote_harvest::output::write_quotes;
use quote_harvest::{Quote, QuoteError};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders one quote container the way the listing site does
fn quote_div(text: &str, author: &str, tags: &[&str]) -> String {
    let tags: String = tags
        .iter()
        .map(|tag| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, tag))
        .collect();
    format!(
        r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
            <span class="text" itemprop="text">{}</span>
            <span>by <small class="author" itemprop="author">{}</small>
            <a href="/author/x">(about)</a></span>
            <div class="tags">
                Tags:
                {}
            </div>
        </div>"#,
        text, author, tags
    )
}

/// Wraps quote containers in a full listing page
fn listing_page(quotes: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="UTF-8"><title>Quotes to Scrape</title></head>
        <body><div class="container"><div class="row"><div class="col-md-8">{}</div></div></div></body></html>"#,
        quotes.concat()
    )
}

async fn mount_page(server: &MockServer, page: u32, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/page/{}/", page)))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn test_config(base_url: &str) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
        },
        http: HttpConfig {
            request_timeout_secs: Some(10),
        },
        output: OutputConfig {
            csv_path: "unused.csv".to_string(),
        },
    }
}

#[tokio::test]
async fn test_two_quotes_then_not_found() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        200,
        listing_page(&[
            quote_div("A", "Alice", &["wisdom"]),
            quote_div("B", "Bob", &[]),
        ]),
    )
    .await;
    mount_page(&mock_server, 2, 404, "Not Found".to_string()).await;

    let harvest = fetch_all(&mock_server.uri()).await.expect("Harvest failed");

    assert_eq!(
        harvest.quotes,
        vec![
            Quote::new("A", "Alice", vec!["wisdom".to_string()]),
            Quote::new("B", "Bob", vec![]),
        ]
    );
    assert_eq!(harvest.stop_reason, StopReason::Status(404));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("quotes.csv");
    write_quotes(&harvest.quotes, &output).expect("Failed to write CSV");

    let content = std::fs::read_to_string(&output).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "text,author,tags");
    assert_eq!(lines[1], "A,Alice,['wisdom']");
    assert_eq!(lines[2], "B,Bob,[]");
}

#[tokio::test]
async fn test_stops_at_empty_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        200,
        listing_page(&[quote_div("one", "X", &["a", "b"]), quote_div("two", "Y", &[])]),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        200,
        listing_page(&[quote_div("three", "Z", &["c"])]),
    )
    .await;
    mount_page(
        &mock_server,
        3,
        200,
        listing_page(&["<p>No quotes found!</p>".to_string()]),
    )
    .await;

    // Never requested: the empty page ends pagination
    Mock::given(method("GET"))
        .and(path("/page/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[quote_div(
            "four", "W", &[],
        )])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let harvest = fetch_all(&mock_server.uri()).await.expect("Harvest failed");

    let texts: Vec<&str> = harvest.quotes.iter().map(|q| q.text()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
    assert_eq!(harvest.quotes[0].tags(), ["a", "b"]);
    assert_eq!(harvest.pages_fetched, 2);
    assert_eq!(harvest.stopped_at_page, 3);
    assert_eq!(harvest.stop_reason, StopReason::EmptyPage);
}

#[tokio::test]
async fn test_server_error_truncates_silently() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        200,
        listing_page(&[quote_div("kept", "K", &[])]),
    )
    .await;
    mount_page(&mock_server, 2, 500, "Internal Server Error".to_string()).await;

    let harvest = fetch_all(&mock_server.uri()).await.expect("Harvest failed");

    assert_eq!(harvest.quotes.len(), 1);
    assert_eq!(harvest.stop_reason, StopReason::Status(500));
}

#[tokio::test]
async fn test_unreachable_server_ends_with_no_quotes() {
    // Bind and release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let base_url = format!("http://{}", listener.local_addr().expect("No local addr"));
    drop(listener);

    let harvest = fetch_all(&base_url).await.expect("Harvest failed");

    assert!(harvest.quotes.is_empty());
    assert!(matches!(harvest.stop_reason, StopReason::Network(_)));
}

#[tokio::test]
async fn test_broken_markup_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        200,
        listing_page(&[r#"<div class="quote"><span class="text">no author</span></div>"#
            .to_string()]),
    )
    .await;

    let result = fetch_all(&mock_server.uri()).await;

    assert!(matches!(
        result,
        Err(QuoteError::StructuralParse {
            container: 0,
            element: ".author"
        })
    ));
}

#[tokio::test]
async fn test_config_user_agent_and_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[quote_div(
            "ua", "Agent", &[],
        )])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = test_config(&format!("{}/", mock_server.uri()));
    let harvest = fetch_all_with_config(&config)
        .await
        .expect("Harvest failed");

    assert_eq!(harvest.quotes.len(), 1);
    assert_eq!(harvest.quotes[0].author(), "Agent");
    assert_eq!(harvest.stop_reason, StopReason::Status(404));
}

#[tokio::test]
async fn test_non_200_success_status_ends_pagination() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        200,
        listing_page(&[quote_div("first", "One", &[])]),
    )
    .await;
    // 203 is a 2xx status, but only 200 counts as a listing page
    mount_page(
        &mock_server,
        2,
        203,
        listing_page(&[quote_div("second", "Two", &[])]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    let harvest = fetch_all(&mock_server.uri()).await.expect("Harvest failed");

    assert_eq!(harvest.quotes.len(), 1);
    assert_eq!(harvest.quotes[0].text(), "first");
    assert_eq!(harvest.stopped_at_page, 2);
    assert_eq!(harvest.stop_reason, StopReason::Status(203));
}
