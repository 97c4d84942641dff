//! Quote-Harvest: a paginated quote scraper
//!
//! This crate walks the numbered listing pages of a quotes site, extracts each
//! quote's text, author and tags, and writes the collected records to a CSV file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Quote-Harvest operations
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Quote container #{container} has no '{element}' element")]
    StructuralParse {
        container: usize,
        element: &'static str,
    },

    #[error("Invalid selector '{selector}': {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Quote-Harvest operations
pub type Result<T> = std::result::Result<T, QuoteError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{fetch_all, parse_page, Harvest, PageOutcome, StopReason};
pub use output::write_quotes;
pub use record::{Quote, QUOTE_FIELDS};
