//! JSONL parser for waterfall items.
//!
//! One item per line:
//!
//! ```text
//! {"key": "optional", "text": "content", "height": 12}
//! ```
//!
//! `key` may be a string or a number and defaults to the 1-based line
//! number. `height` is an optional non-negative hint used when there is no
//! renderer to measure with.

use crate::model::{Item, ItemKey, ParseError};
use serde::Deserialize;
use tracing::warn;

/// Raw JSON structure for deserializing items.
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    key: Option<RawKey>,
    text: String,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Number(serde_json::Number),
}

/// Parse a single JSONL line into an Item.
///
/// # Errors
///
/// Returns `ParseError` if the JSON is malformed, `text` is missing, or the
/// height hint is negative.
pub fn parse_item(raw: &str, line_number: usize) -> Result<Item, ParseError> {
    let raw_item: RawItem = serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })?;

    let key = match raw_item.key {
        Some(RawKey::Text(text)) => {
            ItemKey::new(text).unwrap_or_else(|_| ItemKey::from_line(line_number))
        }
        Some(RawKey::Number(n)) => ItemKey::new(n.to_string())
            .unwrap_or_else(|_| ItemKey::from_line(line_number)),
        None => ItemKey::from_line(line_number),
    };

    let item = Item::new(key, raw_item.text);
    match raw_item.height {
        // serde_json rejects NaN and infinities, so only the sign is checked.
        Some(height) if height < 0.0 => Err(ParseError::InvalidHeight {
            line: line_number,
            value: height,
        }),
        Some(height) => Ok(item.with_height_hint(height)),
        None => Ok(item),
    }
}

/// Items parsed from a batch of lines, plus the lines that were rejected.
#[derive(Debug, Default)]
pub struct ParsedItems {
    /// Successfully parsed items, in input order.
    pub items: Vec<Item>,
    /// Rejected lines.
    pub errors: Vec<ParseError>,
}

/// Parse lines, skipping blanks and logging malformed lines.
///
/// `first_line` is the 1-based number of the first line in `lines`.
pub fn parse_lines<I, S>(lines: I, first_line: usize) -> ParsedItems
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedItems::default();
    for (offset, line) in lines.into_iter().enumerate() {
        parsed.push_line(line.as_ref(), first_line + offset);
    }
    parsed
}

/// Like [`parse_lines`], for raw lines as read from a file or pipe.
///
/// A line that is not UTF-8 is logged and skipped like malformed JSON.
pub fn parse_byte_lines<I, B>(lines: I, first_line: usize) -> ParsedItems
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut parsed = ParsedItems::default();
    for (offset, line) in lines.into_iter().enumerate() {
        let line_number = first_line + offset;
        match std::str::from_utf8(line.as_ref()) {
            Ok(text) => parsed.push_line(text, line_number),
            Err(_) => parsed.reject(ParseError::InvalidUtf8 { line: line_number }),
        }
    }
    parsed
}

impl ParsedItems {
    fn push_line(&mut self, line: &str, line_number: usize) {
        if line.trim().is_empty() {
            return;
        }
        match parse_item(line, line_number) {
            Ok(item) => self.items.push(item),
            Err(error) => self.reject(error),
        }
    }

    fn reject(&mut self, error: ParseError) {
        warn!(line = error.line(), %error, "skipping malformed item");
        self.errors.push(error);
    }
}
