//! Layout engine - Column resolution, placement, measurement, and windowing
//!
//! This module is the host-independent core: it never renders and never
//! measures. The host feeds it signals (container width, viewport size,
//! scroll offset, measured heights) and reads back immutable frames.
//!
//! # Module Structure
//!
//! - `types`: ItemIndex newtype and length sanitizing helpers
//! - `breakpoints`: BreakpointTable / ColumnSpec - width → column count
//! - `placement`: Shortest-column placement into a LayoutResult
//! - `measurement`: MeasurementStore - measured heights with estimate fallback
//! - `window`: WindowQuery / VisibleSet - visible items for a scroll window
//! - `scroll`: ScrollPosition - semantic scroll position and anchoring
//! - `hit_test`: HitTestResult - content-space point → item
//! - `orchestrator`: Orchestrator - coalescing recomputation pipeline

pub mod breakpoints;
pub mod measurement;
pub mod orchestrator;
pub mod placement;
pub mod scroll;
pub mod types;
pub mod window;

pub use breakpoints::{resolve, Breakpoint, BreakpointTable, ColumnSpec};
pub use hit_test::HitTestResult;
pub use measurement::{HeightEntry, MeasurementStore};
pub use orchestrator::{
    DataChange, Frame, LayoutOptions, Orchestrator, PassKind, PassStats, Phase, VisibleItem,
};
pub use placement::{place, LayoutResult, PlacementParams, PlacementStrategy, Position};
pub use scroll::{capture_anchor, max_scroll_offset, ScrollPosition};
pub use types::{item_width, ItemIndex};
pub use window::{visible_indices, VisibleSet, WindowQuery};
