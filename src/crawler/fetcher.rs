//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with a descriptive user agent string
//! - GET requests for numbered listing pages
//! - Classifying each response as a page body or a stop condition

use crate::config::{HttpConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Server answered with 200 OK
    Success {
        /// HTTP status code
        status_code: u16,
        /// Raw page body
        body: Vec<u8>,
    },

    /// Server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No usable response (connection refused, timeout, truncated body, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// The request timeout is applied only when one is configured; by default a
/// slow server holds the run for as long as it takes to answer.
///
/// # Example
///
/// ```no_run
/// use quote_harvest::config::{HttpConfig, UserAgentConfig};
/// use quote_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(format_user_agent(user_agent))
        .gzip(true)
        .brotli(true);

    if let Some(secs) = http.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Formats the user agent as `Name/Version (+ContactURL)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{})",
        config.crawler_name, config.crawler_version, config.contact_url
    )
}

/// Builds the URL of listing page `page` under `base_url`
///
/// A trailing slash on the base is not doubled.
pub fn page_url(base_url: &str, page: u32) -> String {
    format!("{}/page/{}/", base_url.trim_end_matches('/'), page)
}

/// Fetches one URL with a single GET request
///
/// No retries: every failure is reported back to the caller as-is.
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    // Only 200 counts as a listing page; any other status ends pagination
    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
