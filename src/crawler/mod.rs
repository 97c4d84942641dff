//! Crawler module for listing-page fetching and processing
//!
//! This module contains the scraping pipeline, including:
//! - HTTP fetching of numbered listing pages
//! - HTML parsing and quote extraction
//! - Pagination until the first failing or empty page

mod fetcher;
mod paginator;
mod parser;

pub use fetcher::{build_http_client, fetch_page, format_user_agent, page_url, FetchResult};
pub use paginator::{
    fetch_all, fetch_all_with_config, Harvest, HttpPageSource, PageOutcome, PageSource,
    Paginator, StopReason,
};
pub use parser::parse_page;
