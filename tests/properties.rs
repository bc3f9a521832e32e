use egui::pos2;
use proptest::prelude::*;

use egui_gantt::chart::ChartHandler;
use egui_gantt::{
    BasicGanttModel, Calendar, ChartConfig, CoordinateMapper, EditorOptions, GanttChart,
    PointerEvent, RecordAdapter, RowInsets, SnapPolicy, TaskAdapter, TaskEditor, TaskRecord,
    DAY_MILLIS,
};

type Chart = GanttChart<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;

fn chart(start: i64, end: i64) -> Chart {
    let mut adapter = RecordAdapter::new();
    adapter.insert(1, TaskRecord::new("A", start, end, 0));
    adapter.insert(2, TaskRecord::new("B", 0, 30 * DAY_MILLIS, 1));
    let config = ChartConfig {
        row_insets: RowInsets::ZERO,
        ..ChartConfig::default()
    };
    let mut chart = GanttChart::with_config(BasicGanttModel::new(vec![1, 2]), adapter, config)
        .expect("valid config");
    chart.set_container_width(Some(600.0));
    chart
}

fn snap_policy() -> impl Strategy<Value = SnapPolicy> {
    prop_oneof![Just(SnapPolicy::Off), Just(SnapPolicy::Day(Calendar::Utc))]
}

proptest! {
    #[test]
    fn screen_round_trip_is_within_one_unit(
        min in -1_000_000_000_000i64..1_000_000_000_000,
        span in 1i64..100_000_000_000,
        width in 1.0f64..10_000.0,
        zoom in 0.05f64..2000.0,
        inset in 0.0f64..4.0,
        fraction in 0.0f64..=1.0,
    ) {
        let mapper = CoordinateMapper::new(min, min + span, width * zoom + 2.0 * inset)
            .with_insets(inset, inset);
        let value = min + (span as f64 * fraction) as i64;
        let back = mapper.screen_to_canonical(mapper.canonical_to_screen(value));
        prop_assert!((back - value).abs() <= 1, "{} came back as {}", value, back);
    }

    #[test]
    fn drags_never_shrink_a_task_below_the_minimum(
        start_day in 0i64..25,
        length_days in 1i64..5,
        grab in 0usize..3,
        targets in prop::collection::vec((-100.0f32..700.0, -10.0f32..60.0), 1..6),
        snap in snap_policy(),
    ) {
        let start = start_day * DAY_MILLIS;
        let end = start + length_days * DAY_MILLIS;
        let mut chart = chart(start, end);
        let mut editor = TaskEditor::new(EditorOptions::default().with_snap(snap));

        let bounds = chart.task_bounds(&1);
        let x = match grab {
            0 => bounds.min.x,
            1 => bounds.center().x,
            _ => bounds.max.x,
        };
        let mut press = PointerEvent::primary(pos2(x, bounds.center().y));
        editor.pointer_pressed(&mut chart, &mut press);
        prop_assert!(chart.is_task_selected(&1));

        let minimum = chart.config().minimum_duration;
        for (x, y) in targets {
            let mut event = PointerEvent::primary(pos2(x, y));
            editor.pointer_dragged(&mut chart, &mut event);
            let duration = chart.adapter().end(&1) - chart.adapter().start(&1);
            prop_assert!(duration >= minimum, "duration {} below {}", duration, minimum);
            let row = chart.adapter().row(&1);
            prop_assert!((0..2).contains(&row));
        }
    }
}
