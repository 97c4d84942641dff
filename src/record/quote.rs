use std::fmt;

/// Column names in the order records are serialized
pub const QUOTE_FIELDS: [&str; 3] = ["text", "author", "tags"];

/// One quote extracted from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    text: String,
    author: String,
    tags: Vec<String>,
}

impl Quote {
    /// Creates a new quote record
    ///
    /// Tags are stored in the order given; callers are expected to have
    /// trimmed them already.
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }

    /// The quoted content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The attribution name
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Tags in markup order, possibly empty
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.author)?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}
