//! Masonry pane rendering.
//!
//! The engine works in continuous units; the terminal has integer cells.
//! Every conversion between the two lives here so rendering, measuring and
//! mouse hit-testing agree on where an item is.
//!
//! Items partially scrolled out of view are rendered whole into a scratch
//! buffer and only the rows inside the pane are copied, so borders and text
//! clip instead of shifting.

use super::measure::{inner_width, wrap_text};
use super::styles::ItemStyles;
use crate::layout::{Frame, ItemIndex, VisibleItem};
use crate::model::Item;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

/// Width in cells an item is drawn (and measured) at.
///
/// Cell edges are the floors of the item's continuous edges, so adjacent
/// columns never overlap.
pub fn item_cells_width(item: &VisibleItem) -> u16 {
    let start = item.x.floor();
    let end = (item.x + item.width).floor();
    clamp_to_u16(end - start)
}

/// Height in rows an item is drawn at.
pub fn item_cells_height(item: &VisibleItem) -> u16 {
    clamp_to_u16(item.height.round())
}

fn clamp_to_u16(value: f64) -> u16 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u16::MAX) {
        u16::MAX
    } else {
        value as u16
    }
}

/// Content-space point at the center of a terminal cell, or `None` if the
/// cell is outside the pane.
pub fn content_point(area: Rect, column: u16, row: u16, scroll_offset: f64) -> Option<(f64, f64)> {
    let inside = column >= area.x && column < area.right() && row >= area.y && row < area.bottom();
    if !inside {
        return None;
    }
    let x = f64::from(column - area.x) + 0.5;
    let y = f64::from(row - area.y) + 0.5 + scroll_offset;
    Some((x, y))
}

/// Draw every visible item of `frame` into `area` of `buf`.
pub fn render_masonry(
    buf: &mut Buffer,
    area: Rect,
    frame: &Frame,
    items: &[Item],
    selected: Option<ItemIndex>,
    styles: &ItemStyles,
) {
    for visible in frame.items() {
        let Some(item) = items.get(visible.index.get()) else {
            continue;
        };
        let width = item_cells_width(visible);
        let height = item_cells_height(visible);
        if width == 0 || height == 0 {
            continue;
        }

        let left = visible.x.floor() as i64;
        let top = (visible.y - frame.scroll_offset()).floor() as i64;
        if top >= i64::from(area.height) || top + i64::from(height) <= 0 {
            continue;
        }

        let scratch = render_item(
            item,
            width,
            height,
            styles.border(visible.is_estimate, selected == Some(visible.index)),
        );
        blit(buf, area, &scratch, left, top);
    }
}

fn render_item(item: &Item, width: u16, height: u16, border: ratatui::style::Style) -> Buffer {
    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    let lines: Vec<Line> = wrap_text(item.text(), inner_width(width))
        .into_iter()
        .map(Line::from)
        .collect();
    let block = Block::bordered()
        .border_style(border)
        .title(item.key().as_str());
    Paragraph::new(lines).block(block).render(scratch.area, &mut scratch);
    scratch
}

/// Copy `src` into `area` of `dst` with its origin at `(left, top)` relative
/// to the area, dropping whatever falls outside.
fn blit(dst: &mut Buffer, area: Rect, src: &Buffer, left: i64, top: i64) {
    for row in 0..src.area.height {
        let y = top + i64::from(row);
        if y < 0 || y >= i64::from(area.height) {
            continue;
        }
        for col in 0..src.area.width {
            let x = left + i64::from(col);
            if x < 0 || x >= i64::from(area.width) {
                continue;
            }
            let target = (area.x + x as u16, area.y + y as u16);
            if let (Some(cell), Some(slot)) = (src.cell((col, row)), dst.cell_mut(target)) {
                *slot = cell.clone();
            }
        }
    }
}

#[cfg(test)]
#[path = "masonry_tests.rs"]
mod tests;
