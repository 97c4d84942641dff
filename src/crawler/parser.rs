//! HTML parser for extracting quotes from a listing page
//!
//! Each quote lives in a `div.quote` container holding a `.text` element, an
//! `.author` element and zero or more `div.tags > a.tag` links.

use crate::record::Quote;
use crate::QuoteError;
use scraper::{ElementRef, Html, Selector};

const CONTAINER_SELECTOR: &str = "div.quote";
const TEXT_SELECTOR: &str = ".text";
const AUTHOR_SELECTOR: &str = ".author";
const TAG_SELECTOR: &str = "div.tags > a.tag";

/// Compiled selectors for one parse
struct QuoteSelectors {
    container: Selector,
    text: Selector,
    author: Selector,
    tag: Selector,
}

impl QuoteSelectors {
    fn new() -> Result<Self, QuoteError> {
        Ok(Self {
            container: compile(CONTAINER_SELECTOR)?,
            text: compile(TEXT_SELECTOR)?,
            author: compile(AUTHOR_SELECTOR)?,
            tag: compile(TAG_SELECTOR)?,
        })
    }
}

fn compile(selector: &'static str) -> Result<Selector, QuoteError> {
    Selector::parse(selector).map_err(|e| QuoteError::Selector {
        selector,
        message: format!("{:?}", e),
    })
}

/// Parses one listing page and extracts its quotes
///
/// # Arguments
///
/// * `html` - Raw bytes of the HTML document (decoded as UTF-8, lossily)
///
/// # Returns
///
/// * `Ok(Vec<Quote>)` - Quotes in document order; empty if the page has none
/// * `Err(QuoteError::StructuralParse)` - A container lacks its text or author
///
/// # Example
///
/// ```
/// use quote_harvest::parse_page;
///
/// let html = br#"<div class="quote">
///     <span class="text">Hello</span>
///     <small class="author">Alice</small>
///     <div class="tags"><a class="tag"> greeting </a></div>
/// </div>"#;
/// let quotes = parse_page(html).unwrap();
/// assert_eq!(quotes[0].tags(), ["greeting".to_string()]);
/// ```
pub fn parse_page(html: &[u8]) -> Result<Vec<Quote>, QuoteError> {
    let document = Html::parse_document(&String::from_utf8_lossy(html));
    let selectors = QuoteSelectors::new()?;

    document
        .select(&selectors.container)
        .enumerate()
        .map(|(index, container)| parse_single_quote(container, index, &selectors))
        .collect()
}

/// Extracts one quote from its container element
fn parse_single_quote(
    container: ElementRef<'_>,
    index: usize,
    selectors: &QuoteSelectors,
) -> Result<Quote, QuoteError> {
    let text = first_text(container, &selectors.text).ok_or(QuoteError::StructuralParse {
        container: index,
        element: TEXT_SELECTOR,
    })?;

    let author = first_text(container, &selectors.author).ok_or(QuoteError::StructuralParse {
        container: index,
        element: AUTHOR_SELECTOR,
    })?;

    let tags = container
        .select(&selectors.tag)
        .map(|tag| tag.text().collect::<String>().trim().to_string())
        .collect();

    Ok(Quote::new(text, author, tags))
}

/// Text content of the first descendant matching `selector`
fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
}
