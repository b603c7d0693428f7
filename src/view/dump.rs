//! Non-interactive layout dump.
//!
//! Lays items out once at a fixed size, taking each item's `height` hint as
//! its measurement, and returns the resulting frame as JSON.

use crate::config::ResolvedConfig;
use crate::layout::{DataChange, ItemIndex, Orchestrator};
use crate::model::Item;
use serde_json::{json, Value};

/// Lay out `items` in a `width` × `height` viewport and describe the frame.
///
/// Items without a hint keep the estimate and are flagged `is_estimate`.
pub fn dump_frame(items: &[Item], config: &ResolvedConfig, width: u16, height: u16) -> Value {
    let mut orchestrator = Orchestrator::new(config.layout.clone());
    orchestrator.set_container_width(f64::from(width));
    orchestrator.set_viewport_size(f64::from(height));
    orchestrator.apply_data_change(DataChange::Reset { len: items.len() });
    for (i, item) in items.iter().enumerate() {
        if let Some(hint) = item.height_hint() {
            orchestrator.report_height(ItemIndex::new(i), hint);
        }
    }
    orchestrator.tick();

    let frame = orchestrator.frame();
    let layout = frame.layout();
    let visible: Vec<Value> = frame
        .items()
        .iter()
        .map(|v| {
            json!({
                "index": v.index,
                "key": items.get(v.index.get()).map(|item| item.key().as_str()),
                "x": v.x,
                "y": v.y,
                "width": v.width,
                "height": v.height,
                "is_estimate": v.is_estimate,
            })
        })
        .collect();

    json!({
        "generation": frame.generation(),
        "kind": frame.kind(),
        "columns": layout.column_count(),
        "item_width": layout.item_width(),
        "total_height": frame.total_height(),
        "scroll_offset": frame.scroll_offset(),
        "viewport_size": frame.viewport_size(),
        "overscan": frame.overscan(),
        "positions": layout.positions(),
        "visible": visible,
    })
}
