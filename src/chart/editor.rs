//! Pointer-driven task editing: move, resize either edge, drag several tasks
//! at once, with optional day snapping and undo recording.

use egui::{pos2, PointerButton, Pos2, Rect};

use super::input::{ChartCursor, ChartHandler, PointerEvent};
use super::undo::{EditKind, GanttEdit, State};
use super::GanttChart;
use crate::model::{
    Calendar, CoordinateMapper, GanttModel, Granularity, TaskAdapter, TaskHandle,
};

/// Distance in pixels from a bar edge that still grabs the edge.
const EDGE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    None,
    Move,
    ResizeStart,
    ResizeEnd,
    Multiple,
}

/// How edited bounds are rounded while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPolicy {
    #[default]
    Off,
    /// Floor edited edges to midnight in the given calendar.
    Day(Calendar),
}

impl SnapPolicy {
    fn floor(self, millis: i64) -> i64 {
        match self {
            SnapPolicy::Off => millis,
            SnapPolicy::Day(calendar) => calendar.truncate(millis, Granularity::Day),
        }
    }

    /// Smallest permitted end for a task starting at `start`.
    fn min_end(self, start: i64, minimum_duration: i64) -> i64 {
        let end = start.saturating_add(minimum_duration);
        match self {
            SnapPolicy::Off => end,
            SnapPolicy::Day(calendar) => calendar.ceil(end, Granularity::Day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOptions {
    pub snap: SnapPolicy,
    /// Commit finished drags to the chart's undo log.
    pub record_undo: bool,
    /// Keep moved tasks within `[0, row_count)`.
    pub clamp_rows: bool,
    /// Scroll the viewport to follow the edited bar.
    pub auto_scroll: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            snap: SnapPolicy::Off,
            record_undo: true,
            clamp_rows: true,
            auto_scroll: true,
        }
    }
}

impl EditorOptions {
    pub fn with_snap(mut self, snap: SnapPolicy) -> Self {
        self.snap = snap;
        self
    }

    pub fn with_undo(mut self, record_undo: bool) -> Self {
        self.record_undo = record_undo;
        self
    }

    pub fn with_row_clamping(mut self, clamp_rows: bool) -> Self {
        self.clamp_rows = clamp_rows;
        self
    }
}

/// Primary-button editor. Selects on press, edits the selection on drag and
/// records one mouse edit per gesture.
pub struct TaskEditor<T> {
    options: EditorOptions,
    mode: EditMode,
    anchor: Option<Pos2>,
    /// The pointer left the press point at some time during the gesture.
    moved: bool,
    /// Pixel mapping frozen at press time, so a drag that widens the range
    /// does not rescale its own delta.
    mapper: Option<CoordinateMapper>,
    press_row: Option<i32>,
    states: Vec<State<T>>,
    edit: Option<GanttEdit<T>>,
}

impl<T: TaskHandle> TaskEditor<T> {
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            mode: EditMode::None,
            anchor: None,
            moved: false,
            mapper: None,
            press_row: None,
            states: Vec::new(),
            edit: None,
        }
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.anchor.is_some()
    }

    fn reset(&mut self) {
        self.mode = EditMode::None;
        self.anchor = None;
        self.moved = false;
        self.mapper = None;
        self.press_row = None;
        self.states.clear();
        self.edit = None;
    }
}

impl<T: TaskHandle> Default for TaskEditor<T> {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

/// Which part of `task` sits under `x`.
pub fn hover_mode<T, M, A>(chart: &GanttChart<T, M, A>, task: &T, x: f32) -> EditMode
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    let x = x as f64;
    let start = chart.canonical_to_screen(chart.adapter().start(task));
    let end = chart.canonical_to_screen(chart.adapter().end(task));
    if (x - start).abs() <= EDGE_TOLERANCE {
        EditMode::ResizeStart
    } else if (x - end).abs() <= EDGE_TOLERANCE {
        EditMode::ResizeEnd
    } else {
        EditMode::Move
    }
}

fn press_mode<T, M, A>(chart: &GanttChart<T, M, A>, pos: Pos2) -> EditMode
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    match chart.selection().len() {
        0 => EditMode::None,
        1 => chart
            .task_at_point(pos)
            .map(|task| hover_mode(chart, &task, pos.x))
            .unwrap_or(EditMode::None),
        _ => EditMode::Multiple,
    }
}

fn cursor_for(mode: EditMode) -> ChartCursor {
    match mode {
        EditMode::ResizeStart => ChartCursor::ResizeWest,
        EditMode::ResizeEnd => ChartCursor::ResizeEast,
        EditMode::Move | EditMode::Multiple => ChartCursor::Move,
        EditMode::None => ChartCursor::Default,
    }
}

impl<T, M, A> ChartHandler<T, M, A> for TaskEditor<T>
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn pointer_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || event.button != PointerButton::Primary {
            return;
        }

        let toggle = event.toggle_modifier();
        match chart.task_at_point(event.pos) {
            Some(task) if toggle => chart.toggle_task_selection(task),
            Some(task) => {
                if !chart.is_task_selected(&task) {
                    chart.select_only(task);
                }
            }
            None if !toggle => chart.clear_selection(),
            None => {}
        }
        chart.request_repaint();

        if toggle {
            return;
        }

        self.reset();
        self.anchor = Some(event.pos);
        self.mode = press_mode(chart, event.pos);
        if self.mode == EditMode::None {
            return;
        }

        self.mapper = Some(chart.mapper());
        self.press_row = chart.row_at(event.pos.y);
        self.states = chart
            .selected_in_model_order()
            .iter()
            .map(|task| State::capture(chart.adapter(), task))
            .collect();

        if self.options.record_undo {
            let mut edit = GanttEdit::new(EditKind::Mouse);
            for state in &self.states {
                edit.add_edited_task(state.task.clone());
            }
            edit.grab_before_snapshot(chart.adapter());
            self.edit = Some(edit);
        }
        event.consume();
    }

    fn pointer_dragged(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };
        if self.states.is_empty() {
            return;
        }
        if event.pos != anchor {
            self.moved = true;
        }

        let mapper = self.mapper.unwrap_or_else(|| chart.mapper());
        let minimum = chart.config().minimum_duration;
        let snap = self.options.snap;
        let base_dx = mapper.screen_to_canonical(event.pos.x as f64)
            - mapper.screen_to_canonical(anchor.x as f64);
        let destination_row = chart.row_at(event.pos.y);
        let row_count = chart.model().row_count();

        for state in &self.states {
            let mut dx = base_dx;
            let mut start = state.start;
            let mut end = state.end;

            match self.mode {
                EditMode::ResizeStart => {
                    if start + dx >= end - minimum {
                        dx = end - start - minimum;
                    }
                    start += dx;
                }
                EditMode::ResizeEnd => {
                    if end + dx <= start + minimum {
                        dx = start - end + minimum;
                    }
                    end += dx;
                }
                EditMode::Move | EditMode::Multiple => {
                    start += dx;
                    end += dx;
                }
                EditMode::None => {}
            }

            if self.options.auto_scroll {
                let x0 = chart.canonical_to_screen(start) as f32;
                let x1 = chart.canonical_to_screen(end) as f32;
                let visible = chart.visible_rect();
                // A bar wider than the viewport on both sides stays put.
                if !(x0 < visible.min.x && x1 > visible.max.x) {
                    let bounds = chart.task_bounds(&state.task);
                    chart.scroll_rect_to_visible(Rect::from_min_max(
                        pos2(x0, bounds.min.y),
                        pos2(x1.max(x0), bounds.max.y),
                    ));
                }
            }

            if self.mode != EditMode::ResizeEnd {
                start = snap.floor(start);
            }
            if self.mode != EditMode::ResizeStart {
                end = snap.floor(end);
            }
            if end - start < minimum {
                end = snap.min_end(start, minimum);
            }

            let adapter = chart.adapter_mut();
            adapter.set_start(&state.task, start);
            adapter.set_end(&state.task, end);

            if self.mode == EditMode::Move {
                if let (Some(destination), Some(pressed)) = (destination_row, self.press_row) {
                    let mut row = destination - pressed + state.row;
                    if self.options.clamp_rows {
                        row = row.clamp(0, (row_count - 1).max(0));
                    }
                    if row != chart.adapter().row(&state.task) {
                        chart.adapter_mut().set_row(&state.task, row);
                    }
                }
            }
        }

        chart.resize();
        chart.request_repaint();
        if chart.config().fire_change_during_drag {
            chart.fire_change();
        }
        event.consume();
    }

    fn pointer_released(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        // Releases of gestures started elsewhere (or with the toggle modifier)
        // pass through untouched.
        let Some(anchor) = self.anchor else {
            return;
        };

        // Snapping can edit a task even when the pointer comes back to where
        // it was pressed.
        if self.moved || event.pos != anchor {
            if let Some(mut edit) = self.edit.take() {
                edit.grab_after_snapshot(chart.adapter());
                if let Err(err) = chart.commit_edit(edit) {
                    tracing::error!("Failed to record edit: {}", err);
                }
            }
        }

        self.reset();
        chart.resize();
        chart.request_repaint();
        chart.fire_change();

        self.pointer_moved(chart, event);
        event.consume();
    }

    fn pointer_moved(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        match chart.task_at_point(event.pos) {
            Some(task) => {
                let mode = hover_mode(chart, &task, event.pos.x);
                chart.set_cursor(cursor_for(mode));
                event.consume();
            }
            None => chart.set_cursor(ChartCursor::Default),
        }
    }
}
