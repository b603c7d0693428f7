//! Status line shown on the last terminal row.

use super::styles::ItemStyles;
use crate::layout::{Frame, MeasurementStore};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
};

/// One-line summary of the current frame.
///
/// ```
/// use waterfall::layout::{DataChange, LayoutOptions, Orchestrator};
/// use waterfall::view::status::status_text;
///
/// let mut orch = Orchestrator::new(LayoutOptions::default());
/// orch.set_container_width(80.0);
/// orch.set_viewport_size(20.0);
/// orch.apply_data_change(DataChange::Reset { len: 3 });
/// orch.tick();
///
/// let text = status_text(&orch.frame(), orch.store());
/// assert!(text.starts_with("3 items"));
/// ```
pub fn status_text(frame: &Frame, store: &MeasurementStore) -> String {
    let layout = frame.layout();
    let max_offset = (frame.total_height() - frame.viewport_size()).max(0.0);
    let percent = if max_offset > 0.0 {
        (frame.scroll_offset() / max_offset * 100.0).round()
    } else {
        100.0
    };

    format!(
        "{} items | {} cols | {}/{} measured | showing {} | {:.0}% | q quit",
        layout.len(),
        layout.column_count(),
        store.measured_count(),
        layout.len(),
        frame.items().len(),
        percent,
    )
}

/// Render the status line into `area`.
pub fn render_status(buf: &mut Buffer, area: Rect, text: &str, styles: &ItemStyles) {
    Paragraph::new(Line::from(text.to_string()))
        .style(styles.status())
        .render(area, buf);
}
