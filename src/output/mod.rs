//! Output module for writing harvested quotes
//!
//! This module handles:
//! - Writing quotes to a CSV file in canonical column order
//! - Summarizing a finished run

mod csv_writer;
pub mod stats;

pub use csv_writer::{format_tags, write_quotes, write_quotes_to};
pub use stats::{print_summary, RunSummary};
