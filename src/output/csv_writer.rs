//! CSV output for harvested quotes
//!
//! The file has a `text,author,tags` header followed by one row per quote.
//! Tags are written as a single field holding a list literal such as
//! `['love', 'life']`, the format downstream readers of these files expect.

use crate::record::{Quote, QUOTE_FIELDS};
use crate::QuoteError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes quotes to a CSV file, creating or truncating it
///
/// There is no temp-file-and-rename step: if writing fails partway the file
/// keeps whatever was written before the failure.
///
/// # Arguments
///
/// * `quotes` - Quotes in the order they should appear
/// * `output_path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote every row
/// * `Err(QuoteError)` - Failed to create or write the file
pub fn write_quotes(quotes: &[Quote], output_path: &Path) -> Result<(), QuoteError> {
    let file = File::create(output_path)?;
    write_quotes_to(quotes, file)?;
    tracing::debug!("Wrote {} rows to {}", quotes.len(), output_path.display());
    Ok(())
}

/// Writes the header and quote rows to any writer
pub fn write_quotes_to<W: Write>(quotes: &[Quote], writer: W) -> Result<(), QuoteError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(QUOTE_FIELDS)?;
    for quote in quotes {
        let tags = format_tags(quote.tags());
        writer.write_record([quote.text(), quote.author(), tags.as_str()])?;
    }
    writer.flush()?;

    Ok(())
}

/// Formats tags as a list literal: `['a', 'b']`, or `[]` when there are none
pub fn format_tags(tags: &[String]) -> String {
    let items: Vec<String> = tags.iter().map(|tag| quote_literal(tag)).collect();
    format!("[{}]", items.join(", "))
}

/// Quotes one string for a list literal
///
/// Single quotes are used unless the value contains a single quote and no
/// double quote. Backslashes, the chosen quote character and non-printable
/// characters are escaped.
fn quote_literal(value: &str) -> String {
    let delimiter = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let code = c as u32;
                if code < 0x100 {
                    out.push_str(&format!("\\x{:02x}", code));
                } else if code < 0x10000 {
                    out.push_str(&format!("\\u{:04x}", code));
                } else {
                    out.push_str(&format!("\\U{:08x}", code));
                }
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Whether `c` is shown as-is inside a list literal
///
/// Control, format, private-use and separator characters are not, with the
/// exception of the ASCII space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format(c) || is_private_use(c))
}

/// Characters in the Unicode format (Cf) category
fn is_format(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}

/// Characters in the Unicode private-use (Co) category
fn is_private_use(c: char) -> bool {
    matches!(
        c as u32,
        0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD
    )
}
