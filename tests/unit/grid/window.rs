use super::*;

fn geometry(scroll_offset_px: u64, overscan_rows: u32) -> GridGeometry {
    GridGeometry {
        item_count: 1000,
        column_count: 5,
        item_size_px: 64,
        gap_px: 8,
        scroll_offset_px,
        visible_height_px: 800,
        overscan_rows,
    }
}

#[test]
fn initial_window_matches_reference_scenario() {
    // itemCount=1000, columns=5, item=64, gap=8, visible=800, overscan=5
    let layout = compute_layout(&geometry(0, 5), WindowPolicy::default(), None).unwrap();
    assert_eq!(layout.total_height_px, 14392);
    assert_eq!(layout.offset_top_px, 0);
    assert_eq!(layout.window, RenderWindow { min: 0, max: 85 });
}

#[test]
fn total_height_is_zero_for_empty_grid() {
    let mut g = geometry(0, 5);
    g.item_count = 0;
    let layout = compute_layout(&g, WindowPolicy::default(), None).unwrap();
    assert_eq!(layout, WindowLayout::empty());
    assert!(layout.window.is_empty());
}

#[test]
fn total_height_formula_holds_for_partial_last_row() {
    let mut g = geometry(0, 5);
    g.item_count = 7; // 2 rows, second partial
    let layout = compute_layout(&g, WindowPolicy::default(), None).unwrap();
    assert_eq!(layout.total_height_px, 2 * 72 - 8);
}

#[test]
fn zero_columns_is_invalid_input() {
    let mut g = geometry(0, 5);
    g.column_count = 0;
    assert!(compute_layout(&g, WindowPolicy::default(), None).is_err());
}

#[test]
fn scroll_down_never_decreases_max() {
    let policy = WindowPolicy {
        retained_rows_limit: None,
    };
    let mut prev = None;
    let mut last_max = 0;
    for offset in (0..10_000u64).step_by(500) {
        let layout = compute_layout(&geometry(offset, 5), policy, prev).unwrap();
        assert!(layout.window.max >= last_max, "window shrank at {offset}");
        assert_eq!(layout.window.min, 0, "min moved while scrolling down");
        last_max = layout.window.max;
        prev = Some(layout.window);
    }
}

#[test]
fn scroll_up_never_increases_min() {
    let policy = WindowPolicy {
        retained_rows_limit: None,
    };
    // Start deep in the list, then scroll back to the top.
    let mut prev = None;
    let mut last_min = usize::MAX;
    for offset in (0..=10_000u64).rev().step_by(500) {
        let layout = compute_layout(&geometry(offset, 5), policy, prev).unwrap();
        assert!(layout.window.min <= last_min, "min grew at {offset}");
        last_min = layout.window.min;
        prev = Some(layout.window);
    }
    assert_eq!(last_min, 0);
}

#[test]
fn window_unions_previous_with_desired() {
    let policy = WindowPolicy {
        retained_rows_limit: None,
    };
    let down = compute_layout(&geometry(7200, 5), policy, None).unwrap();
    // Scrolling back up keeps everything accumulated below.
    let up = compute_layout(&geometry(0, 5), policy, Some(down.window)).unwrap();
    assert_eq!(up.window.min, 0);
    assert_eq!(up.window.max, down.window.max);
}

#[test]
fn epoch_reset_discards_accumulated_range() {
    let policy = WindowPolicy {
        retained_rows_limit: None,
    };
    let grown = compute_layout(&geometry(7200, 5), policy, None).unwrap();
    assert!(grown.window.min > 0);

    // A column-count change starts a new epoch: previous is dropped and the
    // result is exactly the freshly desired window.
    let mut g = geometry(7200, 5);
    g.column_count = 4;
    let fresh = compute_layout(&g, policy, None).unwrap();
    let fresh_again = compute_layout(&g, policy, None).unwrap();
    assert_eq!(fresh, fresh_again);
    assert!(fresh.window.max <= g.item_count);
}

#[test]
fn offset_top_positions_first_materialized_row() {
    let layout = compute_layout(&geometry(7200, 5), WindowPolicy::default(), None).unwrap();
    // visible_start_row = 7200/72 = 100, overscan 5 => first row 95.
    assert_eq!(layout.window.min, 95 * 5);
    assert_eq!(layout.offset_top_px, 95 * 72);
}

#[test]
fn retention_limit_clamps_far_edge() {
    let policy = WindowPolicy {
        retained_rows_limit: Some(40),
    };
    // Accumulate from the top, then jump deep: the stale rows near the top
    // are evicted, the desired band survives.
    let top = compute_layout(&geometry(0, 5), policy, None).unwrap();
    let deep = compute_layout(&geometry(10_000, 5), policy, Some(top.window)).unwrap();
    let rows_spanned = deep.window.max.div_ceil(5) - deep.window.min / 5;
    assert!(rows_spanned <= 40, "spanned {rows_spanned} rows");

    // The desired band is intact: visible_start_row = 10000/72 = 138.
    let desired_min = (138 - 5) * 5;
    assert!(deep.window.min <= desired_min);
    assert!(deep.window.max >= (138 + 12 + 5) * 5);
}

#[test]
fn retention_limit_never_trims_desired_band() {
    let policy = WindowPolicy {
        retained_rows_limit: Some(1),
    };
    let layout = compute_layout(&geometry(0, 5), policy, None).unwrap();
    // Desired band is wider than the limit; it wins.
    assert_eq!(layout.window, RenderWindow { min: 0, max: 85 });
}
