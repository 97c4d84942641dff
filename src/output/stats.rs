//! Run summary for a finished harvest
//!
//! Collects the numbers worth reporting once pagination has stopped and the
//! CSV file has been written.

use crate::crawler::{Harvest, StopReason};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// How many authors to list in the summary
const TOP_AUTHORS: usize = 5;

/// Summary of one harvest run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Pages that contributed quotes
    pub pages_fetched: u32,

    /// Total quotes written
    pub quotes_collected: usize,

    /// Page number at which pagination stopped
    pub stopped_at_page: u32,

    /// Why pagination stopped
    pub stop_reason: StopReason,

    /// Number of distinct authors
    pub unique_authors: usize,

    /// Number of distinct tags
    pub unique_tags: usize,

    /// Most quoted authors, most frequent first (ties by name)
    pub top_authors: Vec<(String, usize)>,

    /// Where the CSV was written
    pub output_path: PathBuf,
}

impl RunSummary {
    /// Builds a summary from a harvest and its output path
    pub fn from_harvest(harvest: &Harvest, output_path: &Path) -> Self {
        let mut by_author: HashMap<&str, usize> = HashMap::new();
        let mut tags = BTreeSet::new();

        for quote in &harvest.quotes {
            *by_author.entry(quote.author()).or_insert(0) += 1;
            tags.extend(quote.tags().iter().map(String::as_str));
        }

        let unique_authors = by_author.len();
        let mut top_authors: Vec<(String, usize)> = by_author
            .into_iter()
            .map(|(author, count)| (author.to_string(), count))
            .collect();
        top_authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_authors.truncate(TOP_AUTHORS);

        Self {
            pages_fetched: harvest.pages_fetched,
            quotes_collected: harvest.quotes.len(),
            stopped_at_page: harvest.stopped_at_page,
            stop_reason: harvest.stop_reason.clone(),
            unique_authors,
            unique_tags: tags.len(),
            top_authors,
            output_path: output_path.to_path_buf(),
        }
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", summary.pages_fetched);
    println!("  Quotes collected: {}", summary.quotes_collected);
    println!("  Unique authors: {}", summary.unique_authors);
    println!("  Unique tags: {}", summary.unique_tags);
    println!(
        "  Stopped at page {} ({})",
        summary.stopped_at_page, summary.stop_reason
    );
    println!();

    if !summary.top_authors.is_empty() {
        println!("Top Authors:");
        for (author, count) in &summary.top_authors {
            println!("  {}: {}", author, count);
        }
        println!();
    }

    println!("Output: {}", summary.output_path.display());
}
