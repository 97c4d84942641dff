//! Record model for extracted quotes
//!
//! A [`Quote`] is created once while a page is parsed and never changes
//! afterwards. [`QUOTE_FIELDS`] is the canonical column order shared by the
//! in-memory record and the CSV header.

mod quote;

pub use quote::{Quote, QUOTE_FIELDS};
