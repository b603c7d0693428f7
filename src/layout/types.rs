//! Core layout newtypes and length sanitization

use serde::Serialize;

/// Item index within the data set. 0-indexed internally, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Create a new ItemIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Get the 1-based index for display purposes.
    pub fn display(&self) -> usize {
        self.0 + 1
    }

    /// Get the next item index.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<usize> for ItemIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Clamp a caller-supplied length to a finite, non-negative value.
///
/// NaN, infinities and negatives become `0.0`. Every length that enters the
/// engine goes through here, so placement and windowing never see them.
pub fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamp a column count to at least one column.
pub fn sanitize_columns(count: usize) -> usize {
    count.max(1)
}

/// Width available to each item once padding and gaps are removed.
///
/// `max(0, (container − 2·padding − gap·(columns − 1)) / columns)`
pub fn item_width(container_width: f64, columns: usize, gap: f64, padding: f64) -> f64 {
    let columns = sanitize_columns(columns);
    let gaps = sanitize_length(gap) * (columns - 1) as f64;
    let usable = sanitize_length(container_width) - 2.0 * sanitize_length(padding) - gaps;
    sanitize_length(usable / columns as f64)
}
