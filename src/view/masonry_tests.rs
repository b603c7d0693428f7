//! Tests for masonry pane rendering

use super::*;
use crate::layout::{ColumnSpec, DataChange, LayoutOptions, Orchestrator, PlacementStrategy};
use crate::model::ItemKey;
use crate::view::styles::ColorConfig;
use ratatui::style::Color;
use std::sync::Arc;

fn items(texts: &[&str]) -> Vec<Item> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Item::new(ItemKey::from_line(i + 1), *text))
        .collect()
}

/// Two columns of width 9 at x = 0 and x = 11, items 5 rows tall.
fn frame_for(len: usize, viewport: f64, scroll: f64) -> Arc<Frame> {
    let mut orch = Orchestrator::new(LayoutOptions {
        columns: ColumnSpec::Fixed(2),
        gap: 2.0,
        padding: 0.0,
        estimate_height: 5.0,
        overscan: Some(0.0),
        anchor_scroll: false,
        strategy: PlacementStrategy::Linear,
    });
    orch.set_container_width(20.0);
    orch.set_viewport_size(viewport);
    orch.apply_data_change(DataChange::Reset { len });
    orch.tick();
    if scroll > 0.0 {
        orch.set_scroll_offset(scroll);
        orch.tick();
    }
    orch.frame()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (buf.area.x..buf.area.right())
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

fn plain() -> ItemStyles {
    ItemStyles::with_color_config(ColorConfig::new(false))
}

#[test]
fn cell_width_uses_floored_edges() {
    let mut item = VisibleItem {
        index: ItemIndex::new(0),
        x: 0.0,
        y: 0.0,
        width: 9.0,
        height: 5.0,
        is_estimate: true,
    };
    assert_eq!(item_cells_width(&item), 9);

    item.x = 10.5;
    assert_eq!(item_cells_width(&item), 9);

    item.width = 9.6;
    assert_eq!(item_cells_width(&item), 10);
}

#[test]
fn cell_height_rounds_and_clamps() {
    let mut item = VisibleItem {
        index: ItemIndex::new(0),
        x: 0.0,
        y: 0.0,
        width: 9.0,
        height: 4.6,
        is_estimate: false,
    };
    assert_eq!(item_cells_height(&item), 5);

    item.height = f64::NAN;
    assert_eq!(item_cells_height(&item), 0);

    item.height = 1e12;
    assert_eq!(item_cells_height(&item), u16::MAX);
}

#[test]
fn content_point_maps_cell_centers() {
    let area = Rect::new(2, 1, 20, 10);
    assert_eq!(content_point(area, 2, 1, 0.0), Some((0.5, 0.5)));
    assert_eq!(content_point(area, 5, 4, 7.0), Some((3.5, 10.5)));
    assert_eq!(content_point(area, 1, 4, 0.0), None);
    assert_eq!(content_point(area, 22, 4, 0.0), None);
    assert_eq!(content_point(area, 5, 11, 0.0), None);
}

#[test]
fn draws_bordered_blocks_titled_with_keys() {
    let frame = frame_for(2, 10.0, 0.0);
    let area = Rect::new(0, 0, 20, 10);
    let mut buf = Buffer::empty(area);

    render_masonry(&mut buf, area, &frame, &items(&["hello", "world"]), None, &plain());

    assert_eq!(row_text(&buf, 0), "┌1──────┐  ┌2──────┐");
    assert_eq!(row_text(&buf, 1), "│hello  │  │world  │");
    assert_eq!(row_text(&buf, 4), "└───────┘  └───────┘");
    assert_eq!(row_text(&buf, 5).trim(), "");
}

#[test]
fn wraps_text_to_the_inner_width() {
    let frame = frame_for(1, 10.0, 0.0);
    let area = Rect::new(0, 0, 20, 10);
    let mut buf = Buffer::empty(area);

    render_masonry(&mut buf, area, &frame, &items(&["one two three"]), None, &plain());

    assert!(row_text(&buf, 1).starts_with("│one two│"));
    assert!(row_text(&buf, 2).starts_with("│three  │"));
}

#[test]
fn partially_scrolled_item_is_clipped_not_shifted() {
    // Four items: column 0 holds 0 and 2, total height 14, viewport 10.
    let frame = frame_for(4, 10.0, 2.0);
    assert_eq!(frame.scroll_offset(), 2.0);
    let area = Rect::new(0, 0, 20, 10);
    let mut buf = Buffer::empty(area);

    render_masonry(&mut buf, area, &frame, &items(&["a", "b", "c", "d"]), None, &plain());

    // Rows 2..5 of item 0 land on pane rows 0..3; its title row is gone.
    assert!(row_text(&buf, 0).starts_with('│'));
    assert!(row_text(&buf, 2).starts_with('└'));
    // Item 2 starts at y = 7, pane row 5.
    assert!(row_text(&buf, 5).starts_with("┌3"));
}

#[test]
fn rendering_stays_inside_the_area() {
    let frame = frame_for(4, 3.0, 0.0);
    let full = Rect::new(0, 0, 30, 8);
    let area = Rect::new(5, 2, 20, 3);
    let mut buf = Buffer::empty(full);

    render_masonry(&mut buf, area, &frame, &items(&["a", "b", "c", "d"]), None, &plain());

    for y in 0..full.height {
        for x in 0..full.width {
            let inside = x >= area.x && x < area.right() && y >= area.y && y < area.bottom();
            if !inside {
                assert_eq!(buf[(x, y)].symbol(), " ", "cell ({x}, {y}) written outside pane");
            }
        }
    }
    assert_eq!(buf[(5, 2)].symbol(), "┌");
    assert_eq!(buf[(5, 4)].symbol(), "│");
}

#[test]
fn items_missing_from_the_data_are_skipped() {
    let frame = frame_for(2, 10.0, 0.0);
    let area = Rect::new(0, 0, 20, 10);
    let mut buf = Buffer::empty(area);

    render_masonry(&mut buf, area, &frame, &items(&["only"]), None, &plain());

    assert!(row_text(&buf, 0).starts_with("┌1"));
    assert_eq!(row_text(&buf, 0).chars().nth(11), Some(' '));
}

#[test]
fn selected_item_gets_the_selection_border() {
    let frame = frame_for(2, 10.0, 0.0);
    let area = Rect::new(0, 0, 20, 10);
    let mut buf = Buffer::empty(area);
    let styles = ItemStyles::with_color_config(ColorConfig::new(true));

    render_masonry(
        &mut buf,
        area,
        &frame,
        &items(&["a", "b"]),
        Some(ItemIndex::new(1)),
        &styles,
    );

    assert_eq!(buf[(11, 0)].fg, Color::Cyan);
    assert_ne!(buf[(0, 0)].fg, Color::Cyan);
}
