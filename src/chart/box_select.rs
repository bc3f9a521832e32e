use egui::{PointerButton, Pos2, Rect, Shape, Stroke};

use super::input::{ChartHandler, PointerEvent};
use super::GanttChart;
use crate::model::{GanttModel, TaskAdapter, TaskHandle};
use crate::ui::theme;

/// Rubber-band selection started by a primary press on empty space.
///
/// Releasing replaces the selection with every task whose bar intersects the
/// dragged box; releasing without dragging simply clears it.
#[derive(Debug, Default)]
pub struct BoxSelectionHandler {
    start: Option<Pos2>,
    current: Option<Rect>,
}

impl BoxSelectionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The box being dragged, in chart coordinates.
    pub fn current_box(&self) -> Option<Rect> {
        self.current
    }
}

impl<T, M, A> ChartHandler<T, M, A> for BoxSelectionHandler
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn pointer_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || event.toggle_modifier() {
            return;
        }
        if event.button == PointerButton::Primary
            && event.click_count == 1
            && chart.task_at_point(event.pos).is_none()
        {
            self.start = Some(event.pos);
            self.current = None;
            event.consume();
        }
    }

    fn pointer_dragged(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let Some(start) = self.start else {
            return;
        };
        self.current = Some(Rect::from_two_pos(start, event.pos));
        chart.request_repaint();
        event.consume();
    }

    fn pointer_released(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || self.start.is_none() {
            return;
        }

        let hits = self
            .current
            .map(|rect| chart.tasks_in_rect(rect))
            .unwrap_or_default();
        tracing::debug!(selected = hits.len(), "box selection");

        let selection = chart.selection_mut();
        selection.clear();
        for task in hits {
            selection.insert(task);
        }

        self.start = None;
        self.current = None;
        chart.request_repaint();
        chart.fire_selection_changed();
        event.consume();
    }

    fn paint_overlay(&self, _chart: &GanttChart<T, M, A>, painter: &egui::Painter, origin: Pos2) {
        let Some(rect) = self.current else {
            return;
        };
        let rect = rect.translate(origin.to_vec2());
        let points = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        painter.extend(Shape::dashed_line(
            &points,
            Stroke::new(1.0, theme::TEXT_PRIMARY),
            4.0,
            3.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BasicGanttModel, RecordAdapter, TaskRecord};
    use egui::pos2;

    type Chart = GanttChart<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;

    fn chart() -> Chart {
        let mut adapter = RecordAdapter::new();
        adapter.insert(1, TaskRecord::new("A", 0, 10, 0));
        adapter.insert(2, TaskRecord::new("B", 50, 100, 1));
        let mut chart = GanttChart::new(BasicGanttModel::new(vec![1, 2]), adapter);
        chart.set_container_width(Some(100.0));
        chart
    }

    #[test]
    fn dragged_box_replaces_selection() {
        let mut chart = chart();
        chart.select_task(1);
        let mut handler = BoxSelectionHandler::new();

        let mut press = PointerEvent::primary(pos2(60.0, 12.0));
        handler.pointer_pressed(&mut chart, &mut press);
        assert!(press.is_consumed());

        let mut drag = PointerEvent::primary(pos2(90.0, 40.0));
        handler.pointer_dragged(&mut chart, &mut drag);
        assert!(handler.current_box().is_some());

        let mut release = PointerEvent::primary(pos2(90.0, 40.0));
        handler.pointer_released(&mut chart, &mut release);
        assert!(release.is_consumed());
        assert_eq!(chart.selected_in_model_order(), vec![2]);
        assert!(handler.current_box().is_none());
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut chart = chart();
        chart.select_task(1);
        let mut handler = BoxSelectionHandler::new();
        let mut press = PointerEvent::primary(pos2(60.0, 12.0));
        handler.pointer_pressed(&mut chart, &mut press);
        let mut release = PointerEvent::primary(pos2(60.0, 12.0));
        handler.pointer_released(&mut chart, &mut release);
        assert!(chart.selection().is_empty());
    }

    #[test]
    fn presses_on_tasks_or_with_modifier_pass_through() {
        let mut chart = chart();
        let mut handler = BoxSelectionHandler::new();

        let mut on_task = PointerEvent::primary(pos2(5.0, 10.0));
        handler.pointer_pressed(&mut chart, &mut on_task);
        assert!(!on_task.is_consumed());

        let mut with_ctrl =
            PointerEvent::primary(pos2(60.0, 12.0)).with_modifiers(egui::Modifiers::CTRL);
        handler.pointer_pressed(&mut chart, &mut with_ctrl);
        assert!(!with_ctrl.is_consumed());

        let mut release = PointerEvent::primary(pos2(60.0, 12.0));
        handler.pointer_released(&mut chart, &mut release);
        assert!(!release.is_consumed());
    }
}
