//! Visible item computation over a non-uniform position table
//!
//! Item `i` is visible iff
//! `y(i) + height(i) >= scroll − overscan` and
//! `y(i) <= scroll + viewport + overscan`.
//!
//! Positions are not evenly spaced, so there is no arithmetic index lookup.
//! [`visible_indices`] is the linear-scan baseline;
//! [`LayoutResult::visible_indices`] binary-searches each column instead.
//!
//! # Complexity
//!
//! - `visible_indices`: O(n)
//! - `LayoutResult::visible_indices`: O(columns · log n + k log k)

use super::placement::LayoutResult;
use super::types::{sanitize_length, ItemIndex};
use serde::Serialize;

/// Scroll window to test items against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowQuery {
    /// Top of the visible area in content space.
    pub scroll_offset: f64,
    /// Height of the visible area.
    pub viewport_size: f64,
    /// Extra margin materialized above and below.
    pub overscan: f64,
}

impl WindowQuery {
    /// Create a query. A NaN offset becomes 0; sizes are clamped to `>= 0`.
    pub fn new(scroll_offset: f64, viewport_size: f64, overscan: f64) -> Self {
        Self {
            scroll_offset: if scroll_offset.is_nan() { 0.0 } else { scroll_offset },
            viewport_size: sanitize_length(viewport_size),
            overscan: sanitize_length(overscan),
        }
    }

    /// Lowest content-space y that is still materialized.
    pub fn top(&self) -> f64 {
        self.scroll_offset - self.overscan
    }

    /// Highest content-space y that is still materialized.
    pub fn bottom(&self) -> f64 {
        self.scroll_offset + self.viewport_size + self.overscan
    }

    fn admits(&self, y: f64, bottom: f64) -> bool {
        bottom >= self.top() && y <= self.bottom()
    }
}

/// Ascending, duplicate-free set of item indices to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct VisibleSet(Vec<ItemIndex>);

impl VisibleSet {
    /// Build from indices in any order; sorts and dedups.
    pub fn from_unsorted(mut indices: Vec<ItemIndex>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    /// Number of visible items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test. O(log n).
    pub fn contains(&self, index: ItemIndex) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Visible indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.0.iter().copied()
    }

    /// Visible indices as a slice.
    pub fn as_slice(&self) -> &[ItemIndex] {
        &self.0
    }

    /// True if every index of `other` is also in `self`.
    pub fn is_superset(&self, other: &VisibleSet) -> bool {
        other.iter().all(|i| self.contains(i))
    }
}

/// Linear-scan windowing. The correctness baseline.
pub fn visible_indices(layout: &LayoutResult, query: WindowQuery) -> VisibleSet {
    VisibleSet(
        layout
            .positions()
            .iter()
            .filter(|p| query.admits(p.y, p.bottom()))
            .map(|p| p.index)
            .collect(),
    )
}

impl LayoutResult {
    /// Windowing by per-column binary search.
    ///
    /// Within a column, both `y` and `y + height` are non-decreasing in
    /// placement order (heights and gap are `>= 0`), so the admitted items
    /// of each column form one contiguous run.
    pub fn visible_indices(&self, query: WindowQuery) -> VisibleSet {
        let positions = self.positions();
        let mut visible = Vec::new();

        for column in 0..self.column_count() {
            let items = self.column(column);
            let start = items.partition_point(|i| positions[i.get()].bottom() < query.top());
            let end = items.partition_point(|i| positions[i.get()].y <= query.bottom());
            if start < end {
                visible.extend_from_slice(&items[start..end]);
            }
        }

        VisibleSet::from_unsorted(visible)
    }
}
