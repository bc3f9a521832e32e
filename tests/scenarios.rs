//! End-to-end gestures through the standard handler chain, without a UI.

use std::cell::Cell;
use std::rc::Rc;

use egui::{pos2, Key, Modifiers, Pos2};
use egui_gantt::{
    BasicGanttModel, BasicLinkModel, Calendar, ChartConfig, GanttChart, GanttError, HandlerChain,
    KeyEvent, LinkType, PointerEvent, RecordAdapter, RowInsets, TaskAdapter, TaskRecord,
    DAY_MILLIS,
};

type Chart = GanttChart<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;
type Handlers = HandlerChain<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;

/// A spans days 0-2 on row 0, B spans days 5-7 on row 1. A week fills 200 px
/// and rows are exactly 20 px tall.
fn fixture() -> (Chart, Handlers) {
    let mut adapter = RecordAdapter::new();
    adapter.insert(1, TaskRecord::new("A", 0, 2 * DAY_MILLIS, 0).with_tooltip("task A"));
    adapter.insert(2, TaskRecord::new("B", 5 * DAY_MILLIS, 7 * DAY_MILLIS, 1));
    let config = ChartConfig {
        row_insets: RowInsets::ZERO,
        ..ChartConfig::default()
    };
    let mut chart = GanttChart::with_config(BasicGanttModel::new(vec![1, 2]), adapter, config)
        .expect("valid config")
        .with_links(BasicLinkModel::new());
    chart.set_container_width(Some(200.0));
    (chart, HandlerChain::standard(Calendar::Utc))
}

fn x_of(chart: &Chart, millis: i64) -> f32 {
    chart.canonical_to_screen(millis) as f32
}

fn drag(
    handlers: &mut Handlers,
    chart: &mut Chart,
    make: fn(Pos2) -> PointerEvent,
    from: Pos2,
    to: Pos2,
) {
    handlers.pressed(chart, &mut make(from));
    handlers.dragged(chart, &mut make(to));
    handlers.released(chart, &mut make(to));
}

fn click(handlers: &mut Handlers, chart: &mut Chart, at: Pos2, count: u32) {
    handlers.pressed(chart, &mut PointerEvent::primary(at).with_click_count(count));
    handlers.released(chart, &mut PointerEvent::primary(at).with_click_count(count));
    handlers.clicked(chart, &mut PointerEvent::primary(at).with_click_count(count));
}

fn key(handlers: &mut Handlers, chart: &mut Chart, key: Key, modifiers: Modifiers) {
    handlers.key_pressed(chart, &mut KeyEvent::new(key).with_modifiers(modifiers));
}

#[test]
fn full_week_spans_the_container() {
    let (chart, _) = fixture();
    assert_eq!(chart.range(), (0, 7 * DAY_MILLIS));
    assert!((x_of(&chart, 7 * DAY_MILLIS) - 200.0).abs() < 1e-3);
    assert_eq!(chart.tooltip_at(pos2(10.0, 10.0)).as_deref(), Some("task A"));
    assert_eq!(chart.tooltip_at(pos2(150.0, 30.0)), None);
}

#[test]
fn dragging_the_right_edge_snaps_to_midnight_and_undoes() {
    let (mut chart, mut handlers) = fixture();
    let edge = x_of(&chart, 2 * DAY_MILLIS);
    let day = 200.0 / 7.0;

    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::primary,
        pos2(edge, 10.0),
        pos2(edge + 1.3 * day, 10.0),
    );

    assert!(chart.is_task_selected(&1));
    assert_eq!(chart.adapter().start(&1), 0);
    assert_eq!(chart.adapter().end(&1), 3 * DAY_MILLIS);
    assert!(chart.can_undo());

    chart.undo().expect("one edit recorded");
    assert_eq!(chart.adapter().end(&1), 2 * DAY_MILLIS);
    assert!(chart.can_redo());

    chart.redo().expect("edit can be redone");
    assert_eq!(chart.adapter().end(&1), 3 * DAY_MILLIS);
    assert!(matches!(chart.redo(), Err(GanttError::CannotRedo)));
}

#[test]
fn moving_a_bar_carries_it_to_the_row_under_the_pointer() {
    let (mut chart, mut handlers) = fixture();
    let day = 200.0 / 7.0;

    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::primary,
        pos2(day, 10.0),
        pos2(2.5 * day, 30.0),
    );

    assert_eq!(chart.adapter().row(&1), 1);
    // 1.5 days later, floored to midnight on both edges
    assert_eq!(chart.adapter().start(&1), DAY_MILLIS);
    assert_eq!(chart.adapter().end(&1), 3 * DAY_MILLIS);
}

#[test]
fn rubber_band_selects_intersecting_bars() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(10.0, 10.0), 1);
    assert!(chart.is_task_selected(&1));

    let selections = Rc::new(Cell::new(0));
    let seen = Rc::clone(&selections);
    chart.add_selection_listener(move |_| seen.set(seen.get() + 1));

    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::primary,
        pos2(130.0, 25.0),
        pos2(190.0, 38.0),
    );

    assert_eq!(chart.selection().len(), 1);
    assert!(chart.is_task_selected(&2));
    assert!(!chart.is_task_selected(&1));
    assert_eq!(selections.get(), 1);
    // No bar moved.
    assert_eq!(chart.adapter().start(&2), 5 * DAY_MILLIS);
    assert!(!chart.can_undo());
}

#[test]
fn clicking_empty_space_clears_the_selection() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(10.0, 10.0), 1);
    click(&mut handlers, &mut chart, pos2(120.0, 10.0), 1);
    assert!(chart.selection().is_empty());
}

#[test]
fn ctrl_click_adds_to_the_selection() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(10.0, 10.0), 1);
    let at = pos2(170.0, 30.0);
    handlers.pressed(
        &mut chart,
        &mut PointerEvent::primary(at).with_modifiers(Modifiers::CTRL),
    );
    handlers.released(
        &mut chart,
        &mut PointerEvent::primary(at).with_modifiers(Modifiers::CTRL),
    );
    assert_eq!(chart.selected_in_model_order(), vec![1, 2]);
}

#[test]
fn secondary_drag_between_bars_adds_a_link() {
    let (mut chart, mut handlers) = fixture();
    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::secondary,
        pos2(20.0, 10.0),
        pos2(170.0, 30.0),
    );

    let links = chart.links().expect("link model installed");
    assert_eq!(links.link_count(), 1);
    let link = links.link_at(0).expect("one link");
    assert_eq!((link.from, link.to, link.kind), (1, 2, LinkType::FinishToStart));

    // Releasing on the source bar is not a link.
    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::secondary,
        pos2(20.0, 10.0),
        pos2(40.0, 10.0),
    );
    assert_eq!(chart.links().map(|l| l.link_count()), Some(1));
}

#[test]
fn removing_a_task_prunes_selection_and_links() {
    let (mut chart, mut handlers) = fixture();
    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::secondary,
        pos2(20.0, 10.0),
        pos2(170.0, 30.0),
    );
    click(&mut handlers, &mut chart, pos2(170.0, 30.0), 1);
    assert!(chart.is_task_selected(&2));

    chart.remove_task(&2);
    assert!(chart.selection().is_empty());
    assert_eq!(chart.links().map(|l| l.link_count()), Some(0));
    assert_eq!(chart.range(), (0, 2 * DAY_MILLIS));
}

#[test]
fn secondary_drag_over_empty_space_zooms_in() {
    let (mut chart, mut handlers) = fixture();
    chart.take_scroll_request();

    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::secondary,
        pos2(130.0, 5.0),
        pos2(190.0, 5.0),
    );
    assert!((chart.zoom() - 200.0 / 60.0).abs() < 0.01);
    assert!(chart.take_scroll_request().is_some());
}

#[test]
fn right_to_left_zoom_gesture_resets() {
    let (mut chart, mut handlers) = fixture();
    chart.set_zoom(4.0).expect("positive zoom");
    // A covers 0..228 and B starts at 571 on an 800 px wide chart.
    drag(
        &mut handlers,
        &mut chart,
        PointerEvent::secondary,
        pos2(400.0, 5.0),
        pos2(300.0, 5.0),
    );
    assert_eq!(chart.zoom(), 1.0);
}

#[test]
fn double_click_renames_in_place() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(20.0, 10.0), 1);
    click(&mut handlers, &mut chart, pos2(20.0, 10.0), 2);
    assert!(chart.is_editing_text());

    if let Some(session) = chart.text_edit_mut() {
        session.buffer = "Kickoff".to_string();
    }
    let revision = chart.revision();
    handlers.pressed(&mut chart, &mut PointerEvent::primary(pos2(170.0, 30.0)));

    assert!(!chart.is_editing_text());
    assert_eq!(chart.adapter().text(&1), "Kickoff");
    assert!(chart.revision() > revision);
}

#[test]
fn arrow_keys_nudge_and_coalesce_into_one_undo_step() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(20.0, 10.0), 1);

    key(&mut handlers, &mut chart, Key::ArrowRight, Modifiers::NONE);
    key(&mut handlers, &mut chart, Key::ArrowRight, Modifiers::NONE);
    assert_eq!(chart.adapter().start(&1), 2 * DAY_MILLIS);
    assert_eq!(chart.adapter().end(&1), 4 * DAY_MILLIS);
    assert_eq!(chart.undo_log().undo_len(), 1);

    chart.undo().expect("coalesced edit");
    assert_eq!(chart.adapter().start(&1), 0);
    assert_eq!(chart.adapter().end(&1), 2 * DAY_MILLIS);
}

#[test]
fn shift_left_never_shrinks_below_the_minimum() {
    let (mut chart, mut handlers) = fixture();
    click(&mut handlers, &mut chart, pos2(20.0, 10.0), 1);

    for _ in 0..3 {
        key(&mut handlers, &mut chart, Key::ArrowLeft, Modifiers::SHIFT);
    }
    assert_eq!(chart.adapter().end(&1), DAY_MILLIS);

    key(&mut handlers, &mut chart, Key::ArrowDown, Modifiers::NONE);
    key(&mut handlers, &mut chart, Key::ArrowDown, Modifiers::NONE);
    assert_eq!(chart.adapter().row(&1), 1);
}

#[test]
fn change_listeners_see_every_drag_step() {
    let (mut chart, mut handlers) = fixture();
    let changes = Rc::new(Cell::new(0));
    let seen = Rc::clone(&changes);
    chart.add_change_listener(move |_| seen.set(seen.get() + 1));

    let day = 200.0 / 7.0;
    handlers.pressed(&mut chart, &mut PointerEvent::primary(pos2(day, 10.0)));
    handlers.dragged(&mut chart, &mut PointerEvent::primary(pos2(1.2 * day, 10.0)));
    handlers.dragged(&mut chart, &mut PointerEvent::primary(pos2(1.4 * day, 10.0)));
    assert_eq!(changes.get(), 2);
    handlers.released(&mut chart, &mut PointerEvent::primary(pos2(1.4 * day, 10.0)));
    assert_eq!(changes.get(), 3);

    chart.set_fire_change_during_drag(false);
    handlers.pressed(&mut chart, &mut PointerEvent::primary(pos2(day, 10.0)));
    handlers.dragged(&mut chart, &mut PointerEvent::primary(pos2(2.0 * day, 10.0)));
    assert_eq!(changes.get(), 3);
}
