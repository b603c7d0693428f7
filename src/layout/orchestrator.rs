//! Recomputation pipeline: width → columns → placement → windowing
//!
//! The orchestrator owns the only mutable engine state (the measurement
//! store and the host signals) and turns triggers into passes:
//!
//! | Trigger                              | Pass     |
//! |--------------------------------------|----------|
//! | container width, columns, data set   | `Full`   |
//! | height report, measurement reset     | `Measure`|
//! | scroll, viewport size                | `Window` |
//!
//! Triggers only record a pending [`PassKind`]. Nothing is recomputed until
//! the host calls [`Orchestrator::tick`] once per display refresh, so any
//! number of triggers inside one frame cost at most one pass. A pending pass
//! is superseded by a trigger of a higher kind and absorbs triggers of an
//! equal or lower kind.
//!
//! Every pass produces a new immutable [`Frame`]. Readers hold an `Arc` to
//! the frame they were given and never observe a half-built one.

use super::breakpoints::ColumnSpec;
use super::measurement::MeasurementStore;
use super::placement::{place, LayoutResult, PlacementParams, PlacementStrategy};
use super::scroll::{capture_anchor, ScrollPosition};
use super::types::{item_width, sanitize_length, ItemIndex};
use super::window::{VisibleSet, WindowQuery};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// Engine configuration supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Fixed column count or responsive breakpoint table.
    pub columns: ColumnSpec,
    /// Space between columns and between stacked items.
    pub gap: f64,
    /// Space around the content box.
    pub padding: f64,
    /// Placeholder height for unmeasured items.
    pub estimate_height: f64,
    /// Extra margin materialized around the viewport.
    /// `None` means one viewport height.
    pub overscan: Option<f64>,
    /// Keep the first visible item steady when measurements shift it.
    pub anchor_scroll: bool,
    /// Shortest-column lookup used by placement.
    pub strategy: PlacementStrategy,
}

impl LayoutOptions {
    /// Copy with every length coerced to a finite, non-negative value.
    ///
    /// Options are compared on every update; a NaN would never compare
    /// equal to itself.
    pub fn sanitized(self) -> Self {
        Self {
            columns: self.columns.sanitized(),
            gap: sanitize_length(self.gap),
            padding: sanitize_length(self.padding),
            estimate_height: sanitize_length(self.estimate_height),
            overscan: self.overscan.map(sanitize_length),
            ..self
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            columns: ColumnSpec::default(),
            gap: 1.0,
            padding: 1.0,
            estimate_height: 6.0,
            overscan: None,
            anchor_scroll: true,
            strategy: PlacementStrategy::Auto,
        }
    }
}

/// How the item set changed.
#[derive(Debug, Clone, PartialEq)]
pub enum DataChange {
    /// Entirely new data: every measurement is dropped.
    Reset {
        /// New item count.
        len: usize,
    },
    /// Items appended or removed at the end; surviving measurements stay.
    Resized {
        /// New item count.
        len: usize,
    },
    /// Items reordered, inserted or removed anywhere.
    /// New index `i` was old index `previous[i]` (`None`: new item).
    Reordered {
        /// Old index of each new position. Its length is the new item count.
        previous: Vec<Option<ItemIndex>>,
    },
    /// Content of one item changed; its measurement is stale.
    ContentChanged {
        /// The changed item.
        index: ItemIndex,
    },
}

/// Amount of work a pass has to do. Ordered by cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    /// Re-run windowing over the existing layout.
    Window,
    /// Re-run placement with the current column count, then windowing.
    Measure,
    /// Resolve columns, re-run placement, then windowing.
    Full,
}

/// Where the pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pass running.
    Idle,
    /// Applying queued height reports.
    Measuring,
    /// Running placement.
    LayingOut,
    /// Computing the visible set.
    Windowing,
}

/// One item the host must render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleItem {
    /// Which item.
    pub index: ItemIndex,
    /// Left edge in content space.
    pub x: f64,
    /// Top edge in content space.
    pub y: f64,
    /// Width to render at.
    pub width: f64,
    /// Height the layout reserved.
    pub height: f64,
    /// `true` when `height` is still the placeholder.
    pub is_estimate: bool,
}

/// Immutable output of one completed pass.
#[derive(Debug, Clone)]
pub struct Frame {
    generation: u64,
    kind: PassKind,
    layout: Arc<LayoutResult>,
    visible: VisibleSet,
    items: Vec<VisibleItem>,
    scroll_offset: f64,
    viewport_size: f64,
    overscan: f64,
}

impl Frame {
    /// Pass counter; 0 before the first tick.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Kind of pass that produced this frame.
    pub fn kind(&self) -> PassKind {
        self.kind
    }

    /// Layout this frame was windowed over.
    pub fn layout(&self) -> &Arc<LayoutResult> {
        &self.layout
    }

    /// Indices to materialize.
    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Geometry of each visible item, ascending by index.
    pub fn items(&self) -> &[VisibleItem] {
        &self.items
    }

    /// Resolved, clamped scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Viewport size the window was computed for.
    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    /// Effective overscan margin.
    pub fn overscan(&self) -> f64 {
        self.overscan
    }

    /// Height of the scroll spacer the host should size.
    pub fn total_height(&self) -> f64 {
        self.layout.total_height()
    }
}

/// Counters for observing coalescing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    /// Completed full passes.
    pub full: u64,
    /// Completed measure passes.
    pub measure: u64,
    /// Completed window-only passes.
    pub window: u64,
    /// Triggers absorbed into an already pending pass.
    pub coalesced: u64,
    /// Pending passes replaced by a higher-kind trigger.
    pub superseded: u64,
    /// Height reports for items no longer in the data set.
    pub dropped_reports: u64,
}

impl PassStats {
    /// Total completed passes.
    pub fn total(&self) -> u64 {
        self.full + self.measure + self.window
    }
}

/// Coalescing recomputation pipeline. See the module docs.
#[derive(Debug)]
pub struct Orchestrator {
    options: LayoutOptions,
    store: MeasurementStore,
    item_count: usize,
    column_count: usize,
    container_width: f64,
    viewport_size: f64,
    scroll: ScrollPosition,
    scroll_offset: f64,
    scroll_delta: f64,
    scroll_requested: bool,
    pending: Option<PassKind>,
    queued_heights: Vec<(ItemIndex, f64)>,
    phase: Phase,
    frame: Arc<Frame>,
    stats: PassStats,
}

impl Orchestrator {
    /// Create an orchestrator with no items and zero-sized signals.
    ///
    /// A full pass is pending, so the first [`tick`](Self::tick) always
    /// produces a frame.
    pub fn new(options: LayoutOptions) -> Self {
        let options = options.sanitized();
        let column_count = options.columns.resolve(0.0);
        let params = PlacementParams::new(column_count, 0.0, options.gap, options.padding)
            .with_strategy(options.strategy);
        let frame = Frame {
            generation: 0,
            kind: PassKind::Full,
            layout: Arc::new(LayoutResult::empty(params)),
            visible: VisibleSet::default(),
            items: Vec::new(),
            scroll_offset: 0.0,
            viewport_size: 0.0,
            overscan: 0.0,
        };
        Self {
            store: MeasurementStore::new(options.estimate_height),
            options,
            item_count: 0,
            column_count,
            container_width: 0.0,
            viewport_size: 0.0,
            scroll: ScrollPosition::Top,
            scroll_offset: 0.0,
            scroll_delta: 0.0,
            scroll_requested: false,
            pending: Some(PassKind::Full),
            queued_heights: Vec::new(),
            phase: Phase::Idle,
            frame: Arc::new(frame),
            stats: PassStats::default(),
        }
    }

    // === Readers ===

    /// Latest completed frame.
    pub fn frame(&self) -> Arc<Frame> {
        Arc::clone(&self.frame)
    }

    /// Layout of the latest completed frame.
    pub fn layout(&self) -> Arc<LayoutResult> {
        Arc::clone(&self.frame.layout)
    }

    /// Current options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Read-only view of the measurement store.
    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    /// Pipeline phase; `Idle` whenever control is outside `tick`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pass counters.
    pub fn stats(&self) -> PassStats {
        self.stats
    }

    /// Kind of the pass the next `tick` will run, if any.
    pub fn pending(&self) -> Option<PassKind> {
        self.pending
    }

    /// True if the next `tick` will produce a frame.
    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// Current item count.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Column count of the last resolved layout input.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Last reported container width.
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Scroll intent re-resolved on every pass.
    ///
    /// `Bottom`, `Fraction` and `AtItem` survive relayout; a relative
    /// scroll turns the position into `AtOffset`.
    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    /// Last reported viewport size.
    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    // === Triggers ===

    /// Container width changed (SizeObserver signal).
    pub fn set_container_width(&mut self, width: f64) {
        let width = sanitize_length(width);
        if width != self.container_width {
            self.container_width = width;
            self.schedule(PassKind::Full);
        }
    }

    /// Visible-area size changed.
    pub fn set_viewport_size(&mut self, size: f64) {
        let size = sanitize_length(size);
        if size != self.viewport_size {
            self.viewport_size = size;
            self.schedule(PassKind::Window);
        }
    }

    /// Replace the column configuration.
    pub fn set_columns(&mut self, columns: ColumnSpec) {
        let columns = columns.sanitized();
        if columns != self.options.columns {
            self.options.columns = columns;
            self.schedule(PassKind::Full);
        }
    }

    /// Replace all options. Measurements survive; the estimate is updated.
    pub fn set_options(&mut self, options: LayoutOptions) {
        let options = options.sanitized();
        if options != self.options {
            self.store.set_estimate(options.estimate_height);
            self.options = options;
            self.schedule(PassKind::Full);
        }
    }

    /// The item set changed.
    pub fn apply_data_change(&mut self, change: DataChange) {
        match change {
            DataChange::Reset { len } => {
                self.store.clear();
                self.item_count = len;
            }
            DataChange::Resized { len } => {
                self.store.retain_below(len);
                self.item_count = len;
            }
            DataChange::Reordered { previous } => {
                self.store.remap(&previous);
                self.item_count = previous.len();
            }
            DataChange::ContentChanged { index } => {
                self.store.invalidate(index);
            }
        }
        // Reports queued against the old item set are meaningless now.
        self.queued_heights.clear();
        self.schedule(PassKind::Full);
    }

    /// A rendered item reported its real height.
    ///
    /// Applied at the next tick in arrival order; last write wins.
    pub fn report_height(&mut self, index: ItemIndex, height: f64) {
        self.queued_heights.push((index, height));
        self.schedule(PassKind::Measure);
    }

    /// Drop every measurement; all items fall back to the estimate.
    pub fn clear_measurements(&mut self) {
        self.store.clear();
        self.queued_heights.clear();
        self.schedule(PassKind::Measure);
    }

    /// Scroll to an absolute offset (clamped at the next tick).
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_to(ScrollPosition::AtOffset(offset));
    }

    /// Scroll relative to the current (or pending) position.
    ///
    /// Deltas accumulate until the next tick and are applied on top of the
    /// position resolved against that tick's layout.
    pub fn scroll_by(&mut self, delta: f64) {
        if delta.is_finite() {
            self.scroll_delta += delta;
        }
        self.scroll_requested = true;
        self.schedule(PassKind::Window);
    }

    /// Scroll to a semantic position, resolved against the next layout.
    ///
    /// Discards relative deltas requested earlier in the same frame.
    pub fn scroll_to(&mut self, position: ScrollPosition) {
        self.scroll = position;
        self.scroll_delta = 0.0;
        self.scroll_requested = true;
        self.schedule(PassKind::Window);
    }

    fn schedule(&mut self, kind: PassKind) {
        match self.pending {
            None => self.pending = Some(kind),
            Some(pending) if kind > pending => {
                trace!(?pending, ?kind, "pending pass superseded");
                self.stats.superseded += 1;
                self.pending = Some(kind);
            }
            Some(pending) => {
                trace!(?pending, ?kind, "trigger coalesced into pending pass");
                self.stats.coalesced += 1;
            }
        }
    }

    // === Pass ===

    /// Run the pending pass, if any, and publish its frame.
    ///
    /// Call once per display refresh. Returns `None` when nothing changed.
    pub fn tick(&mut self) -> Option<Arc<Frame>> {
        let mut kind = self.pending.take()?;

        if !self.queued_heights.is_empty() {
            self.phase = Phase::Measuring;
            if !self.apply_queued_heights() && kind == PassKind::Measure {
                trace!("no height changed; measure pass downgraded to window");
                kind = PassKind::Window;
            }
        }

        // Only a plain offset needs anchoring; the other positions already
        // name what to keep in view.
        let anchor = if kind == PassKind::Measure
            && self.options.anchor_scroll
            && !self.scroll_requested
            && matches!(self.scroll, ScrollPosition::AtOffset(_))
        {
            capture_anchor(&self.frame.layout, self.scroll_offset, self.viewport_size)
        } else {
            None
        };

        let layout = if kind >= PassKind::Measure {
            self.phase = Phase::LayingOut;
            Arc::new(self.run_placement(kind))
        } else {
            Arc::clone(&self.frame.layout)
        };

        self.phase = Phase::Windowing;
        let scroll_offset = self.resolve_scroll(&layout, anchor);

        let overscan = sanitize_length(self.options.overscan.unwrap_or(self.viewport_size));
        let query = WindowQuery::new(scroll_offset, self.viewport_size, overscan);
        let visible = layout.visible_indices(query);
        let items = visible
            .iter()
            .map(|index| {
                let p = &layout.positions()[index.get()];
                VisibleItem {
                    index,
                    x: p.x,
                    y: p.y,
                    width: layout.item_width(),
                    height: p.height,
                    is_estimate: !self.store.is_measured(index),
                }
            })
            .collect();

        match kind {
            PassKind::Full => self.stats.full += 1,
            PassKind::Measure => self.stats.measure += 1,
            PassKind::Window => self.stats.window += 1,
        }

        let frame = Arc::new(Frame {
            generation: self.frame.generation + 1,
            kind,
            layout,
            visible,
            items,
            scroll_offset,
            viewport_size: self.viewport_size,
            overscan,
        });
        debug!(
            generation = frame.generation,
            ?kind,
            items = self.item_count,
            columns = frame.layout.column_count(),
            total_height = frame.total_height(),
            visible = frame.visible.len(),
            scroll_offset,
            "pass complete"
        );
        self.frame = Arc::clone(&frame);
        self.phase = Phase::Idle;
        Some(frame)
    }

    /// Resolve the scroll intent against `layout` and settle pending input.
    fn resolve_scroll(&mut self, layout: &LayoutResult, anchor: Option<ScrollPosition>) -> f64 {
        let intent = anchor.unwrap_or(self.scroll);
        let mut offset = intent.resolve(layout, self.viewport_size);
        if self.scroll_delta != 0.0 {
            offset = ScrollPosition::AtOffset(offset + self.scroll_delta)
                .resolve(layout, self.viewport_size);
            self.scroll = ScrollPosition::AtOffset(offset);
        } else if anchor.is_some() || matches!(self.scroll, ScrollPosition::AtOffset(_)) {
            self.scroll = ScrollPosition::AtOffset(offset);
        }
        self.scroll_delta = 0.0;
        self.scroll_requested = false;
        self.scroll_offset = offset;
        offset
    }

    /// Apply queued reports. Returns `true` if any stored height changed.
    fn apply_queued_heights(&mut self) -> bool {
        let mut changed = false;
        for (index, height) in std::mem::take(&mut self.queued_heights) {
            if index.get() >= self.item_count {
                debug!(%index, items = self.item_count, "dropping height report for unknown item");
                self.stats.dropped_reports += 1;
                continue;
            }
            changed |= self.store.set(index, height);
        }
        changed
    }

    fn run_placement(&mut self, kind: PassKind) -> LayoutResult {
        if kind == PassKind::Full {
            let columns = self.options.columns.resolve(self.container_width);
            if columns != self.column_count {
                debug!(
                    from = self.column_count,
                    to = columns,
                    width = self.container_width,
                    "column count changed"
                );
            }
            self.column_count = columns;
        }

        let width = item_width(
            self.container_width,
            self.column_count,
            self.options.gap,
            self.options.padding,
        );
        let params = PlacementParams::new(
            self.column_count,
            width,
            self.options.gap,
            self.options.padding,
        )
        .with_strategy(self.options.strategy);

        let store = &self.store;
        let layout = place(self.item_count, |i| store.height_of(i), params);
        debug_assert_eq!(layout.len(), self.item_count);
        layout
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
