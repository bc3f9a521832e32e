use egui::{PointerButton, Pos2, Rect, Stroke};

use super::input::{ChartCursor, ChartHandler, PointerEvent};
use super::GanttChart;
use crate::model::{GanttModel, Link, LinkType, TaskAdapter, TaskHandle};
use crate::ui::theme;

/// Draws finish-to-start links with the secondary button: press on the
/// source task, drag, release on the target.
#[derive(Debug)]
pub struct LinkEditorHandler<T> {
    source: Option<(T, Pos2)>,
    pointer: Option<Pos2>,
    target: Option<T>,
}

impl<T> Default for LinkEditorHandler<T> {
    fn default() -> Self {
        Self {
            source: None,
            pointer: None,
            target: None,
        }
    }
}

impl<T: TaskHandle> LinkEditorHandler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_linking(&self) -> bool {
        self.source.is_some()
    }

    /// The task currently highlighted as the link target.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    fn reset(&mut self) {
        self.source = None;
        self.pointer = None;
        self.target = None;
    }
}

impl<T, M, A> ChartHandler<T, M, A> for LinkEditorHandler<T>
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn pointer_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || event.button != PointerButton::Secondary {
            return;
        }
        let Some(task) = chart.task_at_point(event.pos) else {
            return;
        };
        self.source = Some((task, event.pos));
        self.pointer = Some(event.pos);
        self.target = None;
        chart.set_cursor(ChartCursor::Crosshair);
        chart.request_repaint();
        event.consume();
    }

    fn pointer_dragged(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let Some((source, _)) = &self.source else {
            return;
        };
        self.pointer = Some(event.pos);
        self.target = chart
            .task_at_point(event.pos)
            .filter(|hover| hover != source);
        chart.request_repaint();
        event.consume();
    }

    fn pointer_released(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let Some((source, _)) = self.source.take() else {
            return;
        };
        chart.set_cursor(ChartCursor::Default);

        let target = chart
            .task_at_point(event.pos)
            .filter(|hover| *hover != source);
        if let Some(target) = target {
            // Models may ignore a link they already hold.
            let added = match chart.links_mut() {
                Some(links) => {
                    let before = links.link_count();
                    links.add_link(Link::new(
                        source.clone(),
                        target.clone(),
                        LinkType::FinishToStart,
                    ));
                    links.link_count() != before
                }
                None => false,
            };
            if added {
                tracing::debug!(from = ?source, to = ?target, "link added");
                chart.fire_change();
            }
        }

        self.reset();
        chart.request_repaint();
        event.consume();
    }

    fn pointer_moved(&mut self, _chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if !event.is_consumed() && self.is_linking() {
            event.consume();
        }
    }

    fn pointer_clicked(&mut self, _chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if !event.is_consumed() && self.is_linking() {
            event.consume();
        }
    }

    fn paint_overlay(&self, chart: &GanttChart<T, M, A>, painter: &egui::Painter, origin: Pos2) {
        let (Some((_, start)), Some(end)) = (&self.source, self.pointer) else {
            return;
        };
        let offset = origin.to_vec2();
        let stroke = Stroke::new(1.0, theme::TEXT_PRIMARY);

        if let Some(target) = &self.target {
            let bounds: Rect = chart.task_bounds(target).expand(1.0).translate(offset);
            painter.rect_stroke(bounds, 0.0, Stroke::new(1.5, theme::ACCENT));
        }
        painter.line_segment([*start + offset, end + offset], stroke);
        painter.rect_filled(
            Rect::from_center_size(*start + offset, egui::vec2(5.0, 5.0)),
            0.0,
            theme::TEXT_PRIMARY,
        );
    }
}
