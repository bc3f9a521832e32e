use egui::{pos2, PointerButton, Pos2, Rect, Stroke};

use super::input::{ChartHandler, PointerEvent};
use super::{GanttChart, MAX_ZOOM};
use crate::model::{GanttModel, TaskAdapter, TaskHandle};
use crate::ui::theme;

/// Spans narrower than this many pixels are treated as accidental.
const MIN_SPAN: f32 = 5.0;

/// Secondary-button zoom gesture. Dragging right zooms so the spanned time
/// fills the viewport; dragging left resets the zoom.
#[derive(Debug, Default)]
pub struct ZoomHandler {
    start: Option<Pos2>,
    current: Option<Pos2>,
}

impl ZoomHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

/// Zoom factor that stretches `[start_x, end_x]` over the container, and the
/// span's position after zooming.
fn zoom_to_span<T, M, A>(chart: &GanttChart<T, M, A>, start_x: f32, end_x: f32) -> Option<(f64, Rect)>
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    let min = chart.screen_to_canonical(start_x as f64);
    let max = chart.screen_to_canonical(end_x as f64);
    if max <= min {
        return None;
    }
    let (range_min, range_max) = chart.range();
    let zoom = chart.zoom();
    let relative = ((range_max - range_min) as f64 / (max - min) as f64) / zoom;
    let relative = relative.min(MAX_ZOOM / zoom);

    let visible = chart.visible_rect();
    let span = Rect::from_min_max(pos2(start_x, visible.min.y), pos2(end_x, visible.max.y));
    let span = span.intersect(visible);
    let rel = relative as f32;
    let target = Rect::from_min_max(
        pos2(span.min.x * rel, span.min.y),
        pos2(span.max.x * rel, span.max.y),
    );
    Some((zoom * relative, target))
}

impl<T, M, A> ChartHandler<T, M, A> for ZoomHandler
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    fn pointer_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || event.button != PointerButton::Secondary {
            return;
        }
        self.start = Some(event.pos);
        self.current = None;
        chart.request_repaint();
        event.consume();
    }

    fn pointer_dragged(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() || self.start.is_none() {
            return;
        }
        self.current = Some(event.pos);
        chart.request_repaint();
        event.consume();
    }

    fn pointer_released(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        if event.is_consumed() {
            return;
        }
        let Some(start) = self.start.take() else {
            return;
        };
        self.current = None;
        let end = event.pos;

        if (end.x - start.x).abs() < MIN_SPAN {
            tracing::trace!("zoom span too narrow, ignored");
        } else if start.x >= end.x {
            chart.reset_zoom();
            let whole = Rect::from_min_size(Pos2::ZERO, chart.preferred_size());
            chart.scroll_rect_to_visible(whole);
        } else if let Some((zoom, target)) = zoom_to_span(chart, start.x, end.x) {
            match chart.set_zoom(zoom) {
                Ok(()) => chart.scroll_rect_to_visible(target),
                Err(err) => tracing::warn!("Zoom gesture rejected: {}", err),
            }
        }

        chart.request_repaint();
        event.consume();
    }

    fn paint_overlay(&self, chart: &GanttChart<T, M, A>, painter: &egui::Painter, origin: Pos2) {
        let Some(start) = self.start else {
            return;
        };
        let height = chart.height();
        let stroke = Stroke::new(1.0, theme::TEXT_PRIMARY);
        for x in std::iter::once(start.x).chain(self.current.map(|p| p.x)) {
            painter.vline(origin.x + x, origin.y..=origin.y + height, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartConfig, RowInsets};
    use crate::model::{BasicGanttModel, RecordAdapter, TaskRecord};
    use egui::vec2;

    type Chart = GanttChart<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;

    fn chart() -> Chart {
        let mut adapter = RecordAdapter::new();
        adapter.insert(1, TaskRecord::new("A", 0, 1024, 0));
        let config = ChartConfig {
            row_insets: RowInsets::ZERO,
            ..ChartConfig::default()
        };
        let mut chart =
            GanttChart::with_config(BasicGanttModel::new(vec![1]), adapter, config).unwrap();
        chart.set_container_width(Some(128.0));
        chart.set_visible_rect(Some(Rect::from_min_size(Pos2::ZERO, vec2(128.0, 20.0))));
        chart
    }

    fn gesture(chart: &mut Chart, from: f32, to: f32) {
        let mut handler = ZoomHandler::new();
        handler.pointer_pressed(chart, &mut PointerEvent::secondary(pos2(from, 5.0)));
        handler.pointer_dragged(chart, &mut PointerEvent::secondary(pos2(to, 5.0)));
        handler.pointer_released(chart, &mut PointerEvent::secondary(pos2(to, 5.0)));
    }

    #[test]
    fn rightward_span_fills_the_viewport() {
        let mut chart = chart();
        gesture(&mut chart, 64.0, 96.0);
        assert!((chart.zoom() - 4.0).abs() < 1e-9);
        assert!((chart.visible_rect().min.x - 256.0).abs() < 1e-3);
    }

    #[test]
    fn leftward_span_resets_zoom() {
        let mut chart = chart();
        chart.set_zoom(3.0).unwrap();
        gesture(&mut chart, 80.0, 20.0);
        assert_eq!(chart.zoom(), 1.0);
        assert_eq!(chart.visible_rect().min.x, 0.0);
    }

    #[test]
    fn tiny_span_is_ignored() {
        let mut chart = chart();
        gesture(&mut chart, 50.0, 53.0);
        assert_eq!(chart.zoom(), 1.0);
    }
}
