//! Greedy shortest-column waterfall placement
//!
//! # Algorithm
//!
//! 1. Every column's waterline starts at `padding`.
//! 2. Items are placed in index order. Each goes into the column with the
//!    lowest waterline (ties → lowest column index), at
//!    `x = padding + column·(item_width + gap)`, `y = waterline`.
//!    The waterline then advances by `height + gap`.
//! 3. `total_height = max(waterline) + padding`.
//!
//! Placement of item `i` depends only on items `< i` and the column count,
//! so the result is re-derivable from `(heights, columns)` alone. The column
//! waterlines live only for the duration of one call.
//!
//! # Complexity
//!
//! - `Linear`: O(n · columns)
//! - `Heap`: O(n · log columns)

use super::types::{sanitize_columns, sanitize_length, ItemIndex};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Column count above which `PlacementStrategy::Auto` switches to the heap.
pub const AUTO_HEAP_THRESHOLD: usize = 8;

/// How the shortest column is found for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStrategy {
    /// Linear scan for small column counts, heap above the threshold.
    #[default]
    Auto,
    /// Scan every column for every item.
    Linear,
    /// Binary heap keyed by `(waterline, column)`.
    Heap,
}

impl PlacementStrategy {
    fn use_heap(self, columns: usize) -> bool {
        match self {
            PlacementStrategy::Auto => columns > AUTO_HEAP_THRESHOLD,
            PlacementStrategy::Linear => false,
            PlacementStrategy::Heap => true,
        }
    }
}

/// Geometry inputs for one placement run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Number of columns (clamped to `>= 1`).
    pub columns: usize,
    /// Width of every item.
    pub item_width: f64,
    /// Space between columns and between stacked items.
    pub gap: f64,
    /// Space around the whole content box.
    pub padding: f64,
    /// Shortest-column lookup strategy.
    pub strategy: PlacementStrategy,
}

impl PlacementParams {
    /// Create params with the default strategy. Lengths are sanitized.
    pub fn new(columns: usize, item_width: f64, gap: f64, padding: f64) -> Self {
        Self {
            columns: sanitize_columns(columns),
            item_width: sanitize_length(item_width),
            gap: sanitize_length(gap),
            padding: sanitize_length(padding),
            strategy: PlacementStrategy::Auto,
        }
    }

    /// Override the shortest-column strategy.
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Absolute placement of one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Which item.
    pub index: ItemIndex,
    /// Left edge in content space.
    pub x: f64,
    /// Top edge in content space.
    pub y: f64,
    /// Height used for this item during placement.
    pub height: f64,
    /// Column the item was assigned to.
    pub column: usize,
}

impl Position {
    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Immutable result of one placement run.
///
/// # Invariants
/// - `positions.len()` equals the item count of the run
/// - `positions[i].index == i`
/// - every index appears in exactly one of `column_items`, in placement order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    positions: Vec<Position>,
    total_height: f64,
    column_count: usize,
    item_width: f64,
    gap: f64,
    padding: f64,
    #[serde(skip)]
    column_items: Vec<Vec<ItemIndex>>,
}

impl LayoutResult {
    /// Layout with no items for the given geometry.
    pub fn empty(params: PlacementParams) -> Self {
        place(0, |_| 0.0, params)
    }

    /// All positions, indexed by item.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Position of one item.
    pub fn position(&self, index: ItemIndex) -> Option<&Position> {
        self.positions.get(index.get())
    }

    /// Total content height including padding.
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Number of columns used.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Width of every item.
    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    /// Gap used for this run.
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Padding used for this run.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no items were placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Item indices of one column, top to bottom.
    pub fn column(&self, column: usize) -> &[ItemIndex] {
        self.column_items
            .get(column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Waterline of one column, ordered so the max-heap pops the lowest
/// waterline first and breaks ties by the lowest column index.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Waterline {
    height: f64,
    column: usize,
}

impl Eq for Waterline {}

impl Ord for Waterline {
    fn cmp(&self, other: &Self) -> Ordering {
        self.height
            .total_cmp(&other.height)
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for Waterline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-run column bookkeeping. Created and dropped inside [`place`].
enum ColumnState {
    Linear(Vec<f64>),
    Heap {
        heap: BinaryHeap<Reverse<Waterline>>,
        heights: Vec<f64>,
    },
}

impl ColumnState {
    fn new(columns: usize, start: f64, use_heap: bool) -> Self {
        if use_heap {
            let heap = (0..columns)
                .map(|column| Reverse(Waterline { height: start, column }))
                .collect();
            ColumnState::Heap {
                heap,
                heights: vec![start; columns],
            }
        } else {
            ColumnState::Linear(vec![start; columns])
        }
    }

    /// Pick the shortest column and return `(column, waterline)`.
    fn take_shortest(&mut self) -> (usize, f64) {
        match self {
            ColumnState::Linear(heights) => {
                let mut column = 0;
                let mut best = heights[0];
                for (i, &h) in heights.iter().enumerate().skip(1) {
                    if h < best {
                        best = h;
                        column = i;
                    }
                }
                (column, best)
            }
            ColumnState::Heap { heap, heights } => match heap.pop() {
                Some(Reverse(w)) => (w.column, w.height),
                None => (0, heights[0]),
            },
        }
    }

    fn advance(&mut self, column: usize, to: f64) {
        match self {
            ColumnState::Linear(heights) => heights[column] = to,
            ColumnState::Heap { heap, heights } => {
                heights[column] = to;
                heap.push(Reverse(Waterline { height: to, column }));
            }
        }
    }

    fn max_height(&self) -> f64 {
        let heights = match self {
            ColumnState::Linear(heights) => heights,
            ColumnState::Heap { heights, .. } => heights,
        };
        heights.iter().copied().fold(0.0, f64::max)
    }
}

/// Place `item_count` items into a waterfall.
///
/// `height_of` must already return sanitized heights (the measurement store
/// does this); placement does not validate them.
pub fn place<F>(item_count: usize, height_of: F, params: PlacementParams) -> LayoutResult
where
    F: Fn(ItemIndex) -> f64,
{
    let columns = sanitize_columns(params.columns);
    let item_width = sanitize_length(params.item_width);
    let gap = sanitize_length(params.gap);
    let padding = sanitize_length(params.padding);
    let stride = item_width + gap;

    let mut state = ColumnState::new(columns, padding, params.strategy.use_heap(columns));
    let mut positions = Vec::with_capacity(item_count);
    let mut column_items = vec![Vec::new(); columns];

    for i in 0..item_count {
        let index = ItemIndex::new(i);
        let height = height_of(index);
        let (column, y) = state.take_shortest();
        positions.push(Position {
            index,
            x: padding + column as f64 * stride,
            y,
            height,
            column,
        });
        column_items[column].push(index);
        state.advance(column, y + height + gap);
    }

    let total_height = state.max_height() + padding;

    LayoutResult {
        positions,
        total_height,
        column_count: columns,
        item_width,
        gap,
        padding,
        column_items,
    }
}
