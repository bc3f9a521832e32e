use egui::Key;

use super::input::{ChartHandler, KeyEvent};
use super::undo::{EditKind, GanttEdit};
use super::GanttChart;
use crate::model::{GanttModel, TaskAdapter, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nudge {
    Shift(i64),
    ResizeEnd(i64),
    Row(i32),
}

impl Nudge {
    fn from_event(event: &KeyEvent, step: i64) -> Option<Self> {
        let shift = event.modifiers.shift;
        match event.key {
            Key::ArrowLeft if shift => Some(Nudge::ResizeEnd(-step)),
            Key::ArrowRight if shift => Some(Nudge::ResizeEnd(step)),
            Key::ArrowLeft => Some(Nudge::Shift(-step)),
            Key::ArrowRight => Some(Nudge::Shift(step)),
            Key::ArrowUp => Some(Nudge::Row(-1)),
            Key::ArrowDown => Some(Nudge::Row(1)),
            _ => None,
        }
    }
}

/// Arrow-key editing of the selection. Left/Right move by the minimum
/// duration, Shift+Left/Right resize the end, Up/Down change rows.
///
/// Every press is committed as a keyboard edit; a run of presses on the same
/// selection collapses into one undo step.
#[derive(Debug, Default)]
pub struct KeyboardEditor;

impl KeyboardEditor {
    pub fn new() -> Self {
        Self
    }
}

impl<T, M, A> ChartHandler<T, M, A> for KeyboardEditor
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn key_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut KeyEvent) {
        if event.is_consumed() || chart.is_editing_text() || chart.selection().is_empty() {
            return;
        }
        if event.modifiers.ctrl || event.modifiers.command || event.modifiers.alt {
            return;
        }
        let minimum = chart.config().minimum_duration;
        let Some(nudge) = Nudge::from_event(event, minimum) else {
            return;
        };

        let tasks = chart.selected_in_model_order();
        let last_row = (chart.model().row_count() - 1).max(0);

        let mut edit = GanttEdit::new(EditKind::Keyboard);
        for task in &tasks {
            edit.add_edited_task(task.clone());
        }
        edit.grab_before_snapshot(chart.adapter());

        let adapter = chart.adapter_mut();
        for task in &tasks {
            let start = adapter.start(task);
            let end = adapter.end(task);
            match nudge {
                Nudge::Shift(dx) => {
                    adapter.set_start(task, start + dx);
                    adapter.set_end(task, end + dx);
                }
                Nudge::ResizeEnd(dx) => {
                    adapter.set_end(task, (end + dx).max(start + minimum));
                }
                Nudge::Row(dy) => {
                    let row = (adapter.row(task) + dy).clamp(0, last_row);
                    adapter.set_row(task, row);
                }
            }
        }

        edit.grab_after_snapshot(chart.adapter());
        if let Err(err) = chart.commit_edit(edit) {
            tracing::error!("Failed to record keyboard edit: {}", err);
        }

        chart.resize();
        if let Some(first) = tasks.first() {
            let bounds = chart.task_bounds(first);
            chart.scroll_rect_to_visible(bounds);
        }
        chart.request_repaint();
        chart.fire_change();
        event.consume();
    }
}
