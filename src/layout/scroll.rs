//! Semantic scroll position and scroll anchoring

use super::placement::LayoutResult;
use super::types::{sanitize_length, ItemIndex};
use super::window::WindowQuery;

/// Semantic scroll position.
///
/// A sum type that preserves scroll intent across relayout:
/// - `Top`: Always shows from offset 0
/// - `Bottom`: Always shows the end of the content
/// - `AtOffset`: Specific absolute offset
/// - `AtItem`: Keep a specific item's top at a fixed distance from the
///   viewport top (survives relayout)
/// - `Fraction`: Proportional position (for scrollbars)
///
/// # Clamping Behavior
/// Every variant resolves into `[0, max(0, total_height − viewport_size)]`,
/// so a resolved position never shows blank space past the content end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollPosition {
    /// View from the very top.
    #[default]
    Top,

    /// View from the very bottom.
    Bottom,

    /// Specific offset from the top of the content.
    AtOffset(f64),

    /// Keep an item at a given offset from the viewport top.
    /// An unknown item resolves to the top.
    AtItem {
        /// Item to keep in place.
        index: ItemIndex,
        /// Scroll offset minus the item's `y` (positive: item starts above
        /// the viewport top).
        offset_in_item: f64,
    },

    /// Fractional position (0.0 = top, 1.0 = bottom).
    Fraction(f64),
}

impl ScrollPosition {
    /// Create an `AtItem` position with the item flush to the viewport top.
    pub fn at_item(index: ItemIndex) -> Self {
        Self::AtItem {
            index,
            offset_in_item: 0.0,
        }
    }

    /// Resolve against a layout to an absolute, clamped offset.
    pub fn resolve(&self, layout: &LayoutResult, viewport_size: f64) -> f64 {
        let max_offset = max_scroll_offset(layout.total_height(), viewport_size);

        let raw = match *self {
            ScrollPosition::Top => 0.0,
            ScrollPosition::Bottom => max_offset,
            ScrollPosition::AtOffset(offset) => offset,
            ScrollPosition::AtItem {
                index,
                offset_in_item,
            } => layout
                .position(index)
                .map_or(0.0, |p| p.y + offset_in_item),
            ScrollPosition::Fraction(fraction) => {
                let fraction = if fraction.is_nan() { 0.0 } else { fraction };
                fraction.clamp(0.0, 1.0) * max_offset
            }
        };

        clamp_offset(raw, max_offset)
    }
}

/// Largest scroll offset that still fills the viewport.
pub fn max_scroll_offset(total_height: f64, viewport_size: f64) -> f64 {
    sanitize_length(total_height - sanitize_length(viewport_size))
}

fn clamp_offset(offset: f64, max_offset: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max_offset)
}

/// Capture the item to hold steady across a measurement relayout.
///
/// Picks the lowest-indexed item intersecting the viewport (no overscan).
/// Returns `None` at the very top: a viewport pinned to offset 0 stays there.
pub fn capture_anchor(layout: &LayoutResult, scroll_offset: f64, viewport_size: f64) -> Option<ScrollPosition> {
    if scroll_offset <= 0.0 {
        return None;
    }
    let query = WindowQuery::new(scroll_offset, viewport_size, 0.0);
    let first = layout.visible_indices(query).iter().next()?;
    let position = layout.position(first)?;
    Some(ScrollPosition::AtItem {
        index: first,
        offset_in_item: scroll_offset - position.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::placement::{place, PlacementParams};

    /// One column, items of height 10, 15, 25, 50 (total 100), no gap.
    fn layout() -> LayoutResult {
        let heights = [10.0, 15.0, 25.0, 50.0];
        place(4, |i| heights[i.get()], PlacementParams::new(1, 10.0, 0.0, 0.0))
    }

    fn empty() -> LayoutResult {
        place(0, |_| 0.0, PlacementParams::new(1, 10.0, 0.0, 0.0))
    }

    #[test]
    fn default_is_top() {
        assert_eq!(ScrollPosition::default(), ScrollPosition::Top);
    }

    #[test]
    fn at_item_constructor_sets_zero_offset() {
        assert_eq!(
            ScrollPosition::at_item(ItemIndex::new(5)),
            ScrollPosition::AtItem {
                index: ItemIndex::new(5),
                offset_in_item: 0.0
            }
        );
    }

    mod resolve {
        use super::*;

        #[test]
        fn top_resolves_to_zero() {
            assert_eq!(ScrollPosition::Top.resolve(&layout(), 20.0), 0.0);
        }

        #[test]
        fn bottom_resolves_to_max_offset() {
            assert_eq!(ScrollPosition::Bottom.resolve(&layout(), 20.0), 80.0);
        }

        #[test]
        fn bottom_clamps_to_zero_when_viewport_exceeds_content() {
            assert_eq!(ScrollPosition::Bottom.resolve(&layout(), 500.0), 0.0);
        }

        #[test]
        fn at_offset_returns_exact_offset_when_in_range() {
            assert_eq!(ScrollPosition::AtOffset(30.0).resolve(&layout(), 20.0), 30.0);
        }

        #[test]
        fn at_offset_clamps_both_ends() {
            assert_eq!(ScrollPosition::AtOffset(95.0).resolve(&layout(), 20.0), 80.0);
            assert_eq!(ScrollPosition::AtOffset(-5.0).resolve(&layout(), 20.0), 0.0);
        }

        #[test]
        fn at_item_uses_item_y() {
            let pos = ScrollPosition::at_item(ItemIndex::new(2));
            assert_eq!(pos.resolve(&layout(), 20.0), 25.0);
        }

        #[test]
        fn at_item_adds_offset_in_item() {
            let pos = ScrollPosition::AtItem {
                index: ItemIndex::new(2),
                offset_in_item: 5.0,
            };
            assert_eq!(pos.resolve(&layout(), 20.0), 30.0);
        }

        #[test]
        fn at_item_unknown_index_resolves_to_top() {
            let pos = ScrollPosition::at_item(ItemIndex::new(999));
            assert_eq!(pos.resolve(&layout(), 20.0), 0.0);
        }

        #[test]
        fn fraction_maps_onto_scroll_range() {
            assert_eq!(ScrollPosition::Fraction(0.0).resolve(&layout(), 20.0), 0.0);
            assert_eq!(ScrollPosition::Fraction(0.5).resolve(&layout(), 20.0), 40.0);
            assert_eq!(ScrollPosition::Fraction(1.0).resolve(&layout(), 20.0), 80.0);
        }

        #[test]
        fn fraction_clamps_out_of_range_and_nan() {
            assert_eq!(ScrollPosition::Fraction(-0.5).resolve(&layout(), 20.0), 0.0);
            assert_eq!(ScrollPosition::Fraction(1.5).resolve(&layout(), 20.0), 80.0);
            assert_eq!(ScrollPosition::Fraction(f64::NAN).resolve(&layout(), 20.0), 0.0);
        }

        #[test]
        fn empty_layout_all_positions_resolve_to_zero() {
            let positions = [
                ScrollPosition::Top,
                ScrollPosition::Bottom,
                ScrollPosition::AtOffset(100.0),
                ScrollPosition::at_item(ItemIndex::new(5)),
                ScrollPosition::Fraction(0.5),
            ];
            for pos in positions {
                assert_eq!(pos.resolve(&empty(), 10.0), 0.0, "{pos:?}");
            }
        }
    }

    mod anchor {
        use super::*;

        #[test]
        fn no_anchor_at_top() {
            assert_eq!(capture_anchor(&layout(), 0.0, 20.0), None);
        }

        #[test]
        fn anchors_first_item_in_viewport() {
            // Offset 30 sits inside item 2 (25..50).
            let anchor = capture_anchor(&layout(), 30.0, 20.0);
            assert_eq!(
                anchor,
                Some(ScrollPosition::AtItem {
                    index: ItemIndex::new(2),
                    offset_in_item: 5.0
                })
            );
        }

        #[test]
        fn anchor_survives_upstream_growth() {
            let anchor = capture_anchor(&layout(), 30.0, 20.0).expect("anchor");
            let heights = [40.0, 15.0, 25.0, 50.0];
            let grown = place(4, |i| heights[i.get()], PlacementParams::new(1, 10.0, 0.0, 0.0));
            // Item 2 moved from 25 to 55; the viewport follows it.
            assert_eq!(anchor.resolve(&grown, 20.0), 60.0);
        }
    }
}
