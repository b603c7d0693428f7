//! Scenario tables for placement and windowing
//!
//! Each test renders the layout as a small text table and compares it with
//! an inline snapshot, so a change in placement shows up as a readable diff.

use waterfall::layout::{
    place, BreakpointTable, ColumnSpec, DataChange, ItemIndex, LayoutOptions, LayoutResult,
    Orchestrator, PlacementParams, WindowQuery,
};

// ===== Test Helpers =====

/// One line per item, then the total height.
fn table(layout: &LayoutResult) -> String {
    let mut lines: Vec<String> = layout
        .positions()
        .iter()
        .map(|p| {
            format!(
                "#{} col={} x={} y={} h={}",
                p.index.get(),
                p.column,
                p.x,
                p.y,
                p.height
            )
        })
        .collect();
    lines.push(format!("total={}", layout.total_height()));
    lines.join("\n")
}

fn five_items() -> LayoutResult {
    let heights = [100.0, 150.0, 80.0, 120.0, 90.0];
    place(
        heights.len(),
        |i| heights[i.get()],
        PlacementParams::new(2, 100.0, 10.0, 0.0),
    )
}

// ===== Scenarios =====

#[test]
fn five_items_two_columns() {
    insta::assert_snapshot!(table(&five_items()), @r"
    #0 col=0 x=0 y=0 h=100
    #1 col=1 x=110 y=0 h=150
    #2 col=0 x=0 y=110 h=80
    #3 col=1 x=110 y=160 h=120
    #4 col=0 x=0 y=200 h=90
    total=300
    ");
}

#[test]
fn empty_data_is_padding_only() {
    let layout = place(0, |_| 50.0, PlacementParams::new(3, 100.0, 10.0, 8.0));
    insta::assert_snapshot!(table(&layout), @"total=16");
}

#[test]
fn resize_from_three_columns_to_one() {
    let mut orch = Orchestrator::new(LayoutOptions {
        columns: ColumnSpec::Responsive(BreakpointTable::new(1).with(300.0, 3)),
        gap: 10.0,
        padding: 0.0,
        estimate_height: 100.0,
        overscan: Some(0.0),
        ..LayoutOptions::default()
    });
    orch.set_container_width(320.0);
    orch.set_viewport_size(1000.0);
    orch.apply_data_change(DataChange::Reset { len: 4 });
    for (i, h) in [50.0, 60.0, 70.0, 80.0].into_iter().enumerate() {
        orch.report_height(ItemIndex::new(i), h);
    }
    orch.tick();

    insta::assert_snapshot!(table(&orch.layout()), @r"
    #0 col=0 x=0 y=0 h=50
    #1 col=1 x=110 y=0 h=60
    #2 col=2 x=220 y=0 h=70
    #3 col=0 x=0 y=60 h=80
    total=150
    ");

    orch.set_container_width(100.0);
    orch.tick();

    insta::assert_snapshot!(table(&orch.layout()), @r"
    #0 col=0 x=0 y=0 h=50
    #1 col=0 x=0 y=60 h=60
    #2 col=0 x=0 y=130 h=70
    #3 col=0 x=0 y=210 h=80
    total=300
    ");
}

#[test]
fn unmeasured_items_use_the_estimate() {
    let mut orch = Orchestrator::new(LayoutOptions {
        columns: ColumnSpec::Fixed(2),
        gap: 10.0,
        padding: 5.0,
        estimate_height: 40.0,
        overscan: Some(0.0),
        ..LayoutOptions::default()
    });
    orch.set_container_width(220.0);
    orch.set_viewport_size(500.0);
    orch.apply_data_change(DataChange::Reset { len: 4 });
    orch.report_height(ItemIndex::new(1), 100.0);
    orch.tick();

    insta::assert_snapshot!(table(&orch.layout()), @r"
    #0 col=0 x=5 y=5 h=40
    #1 col=1 x=115 y=5 h=100
    #2 col=0 x=5 y=55 h=40
    #3 col=0 x=5 y=105 h=40
    total=160
    ");
}

#[test]
fn window_follows_scroll() {
    let layout = five_items();
    let rows: Vec<String> = [0.0, 100.0, 150.0, 200.0]
        .into_iter()
        .map(|scroll| {
            let visible: Vec<usize> = layout
                .visible_indices(WindowQuery::new(scroll, 100.0, 0.0))
                .iter()
                .map(|i| i.get())
                .collect();
            format!("scroll={scroll} visible={visible:?}")
        })
        .collect();

    insta::assert_snapshot!(rows.join("\n"), @r"
    scroll=0 visible=[0, 1]
    scroll=100 visible=[0, 1, 2, 3, 4]
    scroll=150 visible=[1, 2, 3, 4]
    scroll=200 visible=[3, 4]
    ");
}
