//! Pagination driver - walks numbered listing pages
//!
//! Pages are requested strictly in order starting at 1. The walk ends at the
//! first page that is not served with 200 OK or that holds no quotes; the
//! quotes gathered up to that point are the result. A server error and the
//! real last page look the same from here, and both end the walk quietly.

use crate::config::{Config, HttpConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, page_url, FetchResult};
use crate::crawler::parser::parse_page;
use crate::record::Quote;
use crate::QuoteError;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

/// Why pagination stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The server answered with a status other than 200
    Status(u16),

    /// The request failed before a usable response arrived
    Network(String),

    /// The page was served but held no quotes
    EmptyPage,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::Network(error) => write!(f, "network error: {}", error),
            Self::EmptyPage => write!(f, "empty page"),
        }
    }
}

/// Outcome of processing a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page produced quotes; move on to the next one
    Continue(Vec<Quote>),

    /// Pagination is over
    Stop(StopReason),
}

/// Everything one pagination run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    /// Quotes in fetch order
    pub quotes: Vec<Quote>,

    /// Number of pages that contributed quotes
    pub pages_fetched: u32,

    /// Page number at which pagination stopped
    pub stopped_at_page: u32,

    /// Why pagination stopped
    pub stop_reason: StopReason,
}

/// A source of numbered listing pages
#[async_trait]
pub trait PageSource {
    /// Fetches page `page` (1-based)
    async fn fetch_page(&self, page: u32) -> FetchResult;
}

/// Page source backed by HTTP requests to `<base_url>/page/<N>/`
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    /// Creates a page source around an existing client
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Creates a page source from the configuration
    pub fn from_config(config: &Config) -> Result<Self, QuoteError> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        Ok(Self::new(client, config.source.base_url.clone()))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> FetchResult {
        let url = page_url(&self.base_url, page);
        tracing::debug!("Fetching {}", url);
        fetch_page(&self.client, &url).await
    }
}

/// Drives a [`PageSource`] until a stop condition is hit
pub struct Paginator<S> {
    source: S,
}

impl<S: PageSource> Paginator<S> {
    /// Creates a paginator over the given source
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches and parses a single page
    ///
    /// # Returns
    ///
    /// * `Ok(PageOutcome::Continue(quotes))` - The page held at least one quote
    /// * `Ok(PageOutcome::Stop(reason))` - Status other than 200, network failure or empty page
    /// * `Err(QuoteError)` - The page markup was structurally broken
    pub async fn process_page(&self, page: u32) -> Result<PageOutcome, QuoteError> {
        match self.source.fetch_page(page).await {
            FetchResult::Success { status_code, body } => {
                tracing::debug!("Page {} returned {} ({} bytes)", page, status_code, body.len());
                let quotes = parse_page(&body)?;
                for quote in &quotes {
                    tracing::trace!("Parsed {}", quote);
                }
                if quotes.is_empty() {
                    Ok(PageOutcome::Stop(StopReason::EmptyPage))
                } else {
                    Ok(PageOutcome::Continue(quotes))
                }
            }
            FetchResult::HttpError { status_code } => {
                Ok(PageOutcome::Stop(StopReason::Status(status_code)))
            }
            FetchResult::NetworkError { error } => {
                Ok(PageOutcome::Stop(StopReason::Network(error)))
            }
        }
    }

    /// Walks pages 1, 2, 3, ... and gathers every quote
    ///
    /// There is no page limit: a source that never stops serving quotes keeps
    /// the walk going.
    pub async fn run(&self) -> Result<Harvest, QuoteError> {
        let mut quotes = Vec::new();
        let mut page = 1;

        loop {
            match self.process_page(page).await? {
                PageOutcome::Continue(page_quotes) => {
                    tracing::info!("Page {}: {} quotes", page, page_quotes.len());
                    quotes.extend(page_quotes);
                    page += 1;
                }
                PageOutcome::Stop(reason) => {
                    match &reason {
                        StopReason::Network(_) => {
                            tracing::warn!("Stopping at page {}: {}", page, reason)
                        }
                        _ => tracing::info!("Stopping at page {}: {}", page, reason),
                    }
                    return Ok(Harvest {
                        quotes,
                        pages_fetched: page - 1,
                        stopped_at_page: page,
                        stop_reason: reason,
                    });
                }
            }
        }
    }
}

/// Fetches every listing page under `base_url` with the default client settings
///
/// # Example
///
/// ```no_run
/// # async fn run() -> quote_harvest::Result<()> {
/// let harvest = quote_harvest::fetch_all("https://quotes.toscrape.com").await?;
/// println!("{} quotes", harvest.quotes.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all(base_url: &str) -> Result<Harvest, QuoteError> {
    let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default())?;
    Paginator::new(HttpPageSource::new(client, base_url)).run().await
}

/// Fetches every listing page using the configured source and client settings
pub async fn fetch_all_with_config(config: &Config) -> Result<Harvest, QuoteError> {
    Paginator::new(HttpPageSource::from_config(config)?)
        .run()
        .await
}
