//! Items shown in the waterfall.
//!
//! The engine only ever sees item indices; keys and text live here, in the
//! host's data set.

use serde::Serialize;
use std::fmt;

/// Opaque, non-empty item key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Smart constructor: validates non-empty key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidItemKey::Empty);
        }
        Ok(Self(raw))
    }

    /// Key derived from a 1-based input line number.
    pub fn from_line(line: usize) -> Self {
        Self(line.to_string())
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejected item key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemKey {
    /// The key was the empty string.
    #[error("Item key cannot be empty")]
    Empty,
}

/// One item of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    key: ItemKey,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    height_hint: Option<f64>,
}

impl Item {
    /// Item with no height hint.
    pub fn new(key: ItemKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
            height_hint: None,
        }
    }

    /// Attach a known height, used instead of measuring when no renderer is
    /// available.
    pub fn with_height_hint(mut self, height: f64) -> Self {
        self.height_hint = Some(height);
        self
    }

    /// The item key.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// The item text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Known height, if the input supplied one.
    pub fn height_hint(&self) -> Option<f64> {
        self.height_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_rejects_empty_string() {
        assert_eq!(ItemKey::new(""), Err(InvalidItemKey::Empty));
    }

    #[test]
    fn key_round_trips_text() {
        let key = ItemKey::new("card-7").expect("valid key");
        assert_eq!(key.as_str(), "card-7");
        assert_eq!(key.to_string(), "card-7");
    }

    #[test]
    fn key_from_line_uses_number() {
        assert_eq!(ItemKey::from_line(12).as_str(), "12");
    }

    #[test]
    fn item_without_hint_serializes_without_height() {
        let item = Item::new(ItemKey::from_line(1), "hello");
        let json = serde_json::to_string(&item).expect("serialize");
        assert_eq!(json, r#"{"key":"1","text":"hello"}"#);
    }

    #[test]
    fn item_with_hint_keeps_it() {
        let item = Item::new(ItemKey::from_line(1), "hello").with_height_hint(4.0);
        assert_eq!(item.height_hint(), Some(4.0));
        assert_eq!(item.text(), "hello");
    }
}
