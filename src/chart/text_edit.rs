use egui::PointerButton;

use super::input::{ChartCursor, ChartHandler, PointerEvent};
use super::GanttChart;
use crate::model::{GanttModel, TaskAdapter, TaskHandle};

/// Opens an in-place label editor on a primary double-click. The session
/// itself lives on the chart; the host draws the text field.
#[derive(Debug, Default)]
pub struct TextEditHandler;

impl TextEditHandler {
    pub fn new() -> Self {
        Self
    }
}

impl<T, M, A> ChartHandler<T, M, A> for TextEditHandler
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn pointer_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        // Any press outside the field ends the session, even one another
        // handler already claimed.
        if chart.commit_text_edit() {
            event.consume();
        }
    }

    fn pointer_clicked(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        if event.button == PointerButton::Primary && event.click_count == 2 {
            if let Some(task) = chart.task_at_point(event.pos) {
                chart.begin_text_edit(task);
                event.consume();
            }
        }
    }

    fn pointer_moved(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if chart.is_editing_text() {
            chart.set_cursor(ChartCursor::Default);
            event.consume();
        }
    }
}
