//! Last-observed item heights, with an estimate fallback

use super::types::{sanitize_length, ItemIndex};
use std::collections::HashMap;

/// Height of one item as the engine sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightEntry {
    /// Which item.
    pub index: ItemIndex,
    /// Height in layout units, always `>= 0`.
    pub height: f64,
    /// `true` when no real measurement has been recorded yet.
    pub is_estimate: bool,
}

/// Mapping from item index to its last reported rendered height.
///
/// Unmeasured items read back as the configured estimate. There is at most
/// one entry per index: `set` overwrites, it never merges.
#[derive(Debug, Clone)]
pub struct MeasurementStore {
    estimate: f64,
    measured: HashMap<ItemIndex, f64>,
}

impl MeasurementStore {
    /// Create an empty store with the given estimate height.
    pub fn new(estimate: f64) -> Self {
        Self {
            estimate: sanitize_length(estimate),
            measured: HashMap::new(),
        }
    }

    /// Placeholder height for unmeasured items.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Change the placeholder height. Measured entries are kept.
    pub fn set_estimate(&mut self, estimate: f64) {
        self.estimate = sanitize_length(estimate);
    }

    /// Stored entry for `index`, or the estimate if unmeasured.
    pub fn get(&self, index: ItemIndex) -> HeightEntry {
        match self.measured.get(&index) {
            Some(&height) => HeightEntry {
                index,
                height,
                is_estimate: false,
            },
            None => HeightEntry {
                index,
                height: self.estimate,
                is_estimate: true,
            },
        }
    }

    /// Height only, as placement wants it.
    pub fn height_of(&self, index: ItemIndex) -> f64 {
        self.measured.get(&index).copied().unwrap_or(self.estimate)
    }

    /// Record a real measurement. Last write wins.
    ///
    /// The height is clamped to `>= 0` (NaN → 0). Returns `true` when the
    /// height placement would read for this item actually changed.
    pub fn set(&mut self, index: ItemIndex, height: f64) -> bool {
        let height = sanitize_length(height);
        let previous = self.height_of(index);
        let was_measured = self.measured.insert(index, height).is_some();
        !was_measured || previous != height
    }

    /// Forget the measurement for one item.
    ///
    /// Returns `true` if an entry was removed.
    pub fn invalidate(&mut self, index: ItemIndex) -> bool {
        self.measured.remove(&index).is_some()
    }

    /// Forget every measurement.
    pub fn clear(&mut self) {
        self.measured.clear();
    }

    /// Drop entries at or beyond `len` (the data set shrank).
    pub fn retain_below(&mut self, len: usize) {
        self.measured.retain(|index, _| index.get() < len);
    }

    /// Move entries after a reorder.
    ///
    /// New index `i` takes over the entry of old index `previous[i]`;
    /// `None` means the item is new and starts unmeasured.
    pub fn remap(&mut self, previous: &[Option<ItemIndex>]) {
        let old = std::mem::take(&mut self.measured);
        for (new_index, source) in previous.iter().enumerate() {
            if let Some(height) = source.and_then(|s| old.get(&s).copied()) {
                self.measured.insert(ItemIndex::new(new_index), height);
            }
        }
    }

    /// Number of items with a real measurement.
    pub fn measured_count(&self) -> usize {
        self.measured.len()
    }

    /// True if `index` has a real measurement.
    pub fn is_measured(&self, index: ItemIndex) -> bool {
        self.measured.contains_key(&index)
    }
}

impl Default for MeasurementStore {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn unmeasured_returns_estimate() {
        let store = MeasurementStore::new(120.0);
        let entry = store.get(idx(3));
        assert_eq!(entry.height, 120.0);
        assert!(entry.is_estimate);
        assert_eq!(entry.index, idx(3));
    }

    #[test]
    fn set_records_real_measurement() {
        let mut store = MeasurementStore::new(120.0);
        assert!(store.set(idx(0), 80.0));
        let entry = store.get(idx(0));
        assert_eq!(entry.height, 80.0);
        assert!(!entry.is_estimate);
    }

    #[test]
    fn later_measurement_overwrites_earlier() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(1), 40.0);
        store.set(idx(1), 65.0);
        assert_eq!(store.height_of(idx(1)), 65.0);
        assert_eq!(store.measured_count(), 1);
    }

    #[test]
    fn set_reports_unchanged_value() {
        let mut store = MeasurementStore::new(50.0);
        assert!(store.set(idx(1), 40.0));
        assert!(!store.set(idx(1), 40.0));
    }

    #[test]
    fn measuring_exactly_the_estimate_still_counts_as_change() {
        // Flips is_estimate even though the height is identical.
        let mut store = MeasurementStore::new(50.0);
        assert!(store.set(idx(0), 50.0));
        assert!(!store.get(idx(0)).is_estimate);
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(0), -10.0);
        store.set(idx(1), f64::NAN);
        assert_eq!(store.height_of(idx(0)), 0.0);
        assert_eq!(store.height_of(idx(1)), 0.0);
    }

    #[test]
    fn negative_estimate_clamps_to_zero() {
        let store = MeasurementStore::new(-1.0);
        assert_eq!(store.estimate(), 0.0);
    }

    #[test]
    fn invalidate_reverts_to_estimate() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(2), 10.0);
        assert!(store.invalidate(idx(2)));
        assert!(store.get(idx(2)).is_estimate);
        assert!(!store.invalidate(idx(2)));
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(0), 10.0);
        store.set(idx(1), 20.0);
        store.clear();
        assert_eq!(store.measured_count(), 0);
    }

    #[test]
    fn retain_below_truncates() {
        let mut store = MeasurementStore::new(50.0);
        for i in 0..5 {
            store.set(idx(i), i as f64);
        }
        store.retain_below(3);
        assert_eq!(store.measured_count(), 3);
        assert!(store.is_measured(idx(2)));
        assert!(!store.is_measured(idx(3)));
    }

    #[test]
    fn remap_follows_items_to_new_indices() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(0), 10.0);
        store.set(idx(1), 20.0);
        store.set(idx(2), 30.0);

        // New order: old 2, a fresh item, old 0. Old 1 is gone.
        store.remap(&[Some(idx(2)), None, Some(idx(0))]);

        assert_eq!(store.height_of(idx(0)), 30.0);
        assert!(store.get(idx(1)).is_estimate);
        assert_eq!(store.height_of(idx(2)), 10.0);
        assert_eq!(store.measured_count(), 2);
    }

    #[test]
    fn changing_estimate_keeps_measurements() {
        let mut store = MeasurementStore::new(50.0);
        store.set(idx(0), 10.0);
        store.set_estimate(70.0);
        assert_eq!(store.height_of(idx(0)), 10.0);
        assert_eq!(store.height_of(idx(1)), 70.0);
    }
}
