use egui::{
    pos2, vec2, Align, Event, Id, Key, PointerButton, Pos2, Rect, Sense, TextEdit, Ui, Vec2,
};

use crate::chart::{GanttChart, HandlerChain, KeyEvent, PointerEvent};
use crate::model::{Calendar, GanttModel, TaskAdapter, TaskHandle};
use crate::ui::header::{header_height, layout_header, paint_header};
use crate::ui::text::PainterMeasure;
use crate::ui::theme;

/// Pointer travel, in points, below which a press and release count as a
/// click.
const CLICK_SLOP: f32 = 3.0;

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A change event fired during this frame.
    pub changed: bool,
}

/// Turns egui's raw pointer stream into press/drag/release/click/move events.
/// Lives in egui's temporary memory between frames.
#[derive(Debug, Clone, Default)]
struct PointerTracker {
    held: Option<PointerButton>,
    press_pos: Pos2,
    moved: bool,
    keyboard_active: bool,
}

/// Click count of this frame's release of `button`, as decided by egui's own
/// multi-click detection.
fn release_click_count(ui: &Ui, button: PointerButton) -> u32 {
    ui.input(|i| {
        if i.pointer.button_triple_clicked(button) {
            3
        } else if i.pointer.button_double_clicked(button) {
            2
        } else {
            1
        }
    })
}

/// Render the chart inside a scroll area and route this frame's input
/// through `handlers`.
pub fn show_gantt_chart<T, M, A>(
    chart: &mut GanttChart<T, M, A>,
    handlers: &mut HandlerChain<T, M, A>,
    calendar: Calendar,
    ui: &mut Ui,
) -> ChartInteraction
where
    T: TaskHandle,
    M: GanttModel<T> + 'static,
    A: TaskAdapter<T> + 'static,
{
    let revision = chart.revision();
    let header_font = theme::font_header();
    let header_h = header_height(&PainterMeasure::new(ui.painter(), header_font.clone()));

    // Ctrl+scroll zooms the timeline
    if ui.rect_contains_pointer(ui.max_rect()) {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta > 1.0 {
            chart.zoom_in();
        } else if zoom_delta < 1.0 {
            chart.zoom_out();
        }
    }

    chart.set_container_width(Some(ui.available_width()));
    let scroll_target = chart.take_scroll_request();

    egui::ScrollArea::both()
        .id_salt("gantt-chart")
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let size = chart.preferred_size();
            let (response, painter) =
                ui.allocate_painter(vec2(size.x, size.y + header_h), Sense::click_and_drag());
            let origin = response.rect.min + vec2(0.0, header_h);
            let offset = origin.to_vec2();
            let clip = painter.clip_rect();

            let visible_screen =
                Rect::from_min_max(pos2(clip.min.x, clip.min.y + header_h), clip.max)
                    .intersect(response.rect);
            let visible = visible_screen.translate(-offset);
            chart.set_visible_rect(Some(visible));

            if let Some(target) = scroll_target {
                let target = target.translate(offset);
                ui.scroll_to_rect(
                    Rect::from_min_max(target.min - vec2(0.0, header_h), target.max),
                    None,
                );
            }

            route_input(chart, handlers, ui, response.id, origin, visible_screen);

            paint_chart(chart, handlers, &painter, origin, visible);

            let measure = PainterMeasure::new(&painter, header_font.clone());
            let layout = layout_header(
                &chart.mapper(),
                calendar,
                visible.min.x,
                visible.max.x,
                &measure,
            );
            let header_rect = Rect::from_min_size(clip.min, vec2(clip.width(), header_h));
            paint_header(&painter, &measure, &layout, origin.x, header_rect);

            show_text_editor(chart, ui, offset);

            if response.hovered() {
                ui.ctx().set_cursor_icon(chart.cursor().into());
                let dragging = ui.input(|i| i.pointer.any_down());
                if let Some(hover) = response.hover_pos().filter(|_| !dragging) {
                    if let Some(tip) = chart.tooltip_at(hover - offset) {
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            response.id.with("tooltip"),
                            |ui| {
                                ui.label(tip);
                            },
                        );
                    }
                }
            }
        });

    chart.take_relayout_request();
    if chart.take_repaint_request() {
        ui.ctx().request_repaint();
    }

    ChartInteraction {
        changed: chart.revision() != revision,
    }
}

fn route_input<T, M, A>(
    chart: &mut GanttChart<T, M, A>,
    handlers: &mut HandlerChain<T, M, A>,
    ui: &Ui,
    id: Id,
    origin: Pos2,
    area: Rect,
) where
    T: TaskHandle,
    M: GanttModel<T> + 'static,
    A: TaskAdapter<T> + 'static,
{
    let ctx = ui.ctx();
    let tracker_id = id.with("pointer-tracker");
    let mut tracker = ctx
        .data_mut(|data| data.get_temp::<PointerTracker>(tracker_id))
        .unwrap_or_default();
    let events = ui.input(|i| i.events.clone());
    let offset = origin.to_vec2();
    let editor_rect = chart
        .text_edit()
        .map(|session| chart.task_bounds(&session.task).translate(offset));
    let wants_keyboard = ctx.wants_keyboard_input();

    for event in events {
        match event {
            Event::PointerButton {
                pos,
                button,
                pressed: true,
                modifiers,
            } => {
                let inside = area.contains(pos) && !editor_rect.is_some_and(|r| r.contains(pos));
                tracker.keyboard_active = inside;
                if !inside {
                    continue;
                }
                tracker.held = Some(button);
                tracker.press_pos = pos;
                tracker.moved = false;
                let mut event = PointerEvent::new(pos - offset, button).with_modifiers(modifiers);
                handlers.pressed(chart, &mut event);
            }
            Event::PointerButton {
                pos,
                button,
                pressed: false,
                modifiers,
            } => {
                if tracker.held != Some(button) {
                    continue;
                }
                tracker.held = None;
                let click_count = release_click_count(ui, button);
                let mut event = PointerEvent::new(pos - offset, button)
                    .with_modifiers(modifiers)
                    .with_click_count(click_count);
                handlers.released(chart, &mut event);
                if !tracker.moved {
                    let mut click = PointerEvent::new(pos - offset, button)
                        .with_modifiers(modifiers)
                        .with_click_count(click_count);
                    handlers.clicked(chart, &mut click);
                }
            }
            Event::PointerMoved(pos) => {
                let modifiers = ui.input(|i| i.modifiers);
                match tracker.held {
                    Some(button) => {
                        if (pos - tracker.press_pos).length() > CLICK_SLOP {
                            tracker.moved = true;
                        }
                        let mut event =
                            PointerEvent::new(pos - offset, button).with_modifiers(modifiers);
                        handlers.dragged(chart, &mut event);
                    }
                    None if area.contains(pos) => {
                        let mut event = PointerEvent::new(pos - offset, PointerButton::Primary)
                            .with_modifiers(modifiers);
                        handlers.moved(chart, &mut event);
                    }
                    None => {}
                }
            }
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if tracker.keyboard_active && !wants_keyboard && key != Key::Escape {
                    let mut event = KeyEvent::new(key).with_modifiers(modifiers);
                    handlers.key_pressed(chart, &mut event);
                }
            }
            _ => {}
        }
    }

    ctx.data_mut(|data| data.insert_temp(tracker_id, tracker));
}

/// Paint rows, task bars, links and handler overlays. `visible` is in chart
/// coordinates.
pub fn paint_chart<T, M, A>(
    chart: &GanttChart<T, M, A>,
    handlers: &HandlerChain<T, M, A>,
    painter: &egui::Painter,
    origin: Pos2,
    visible: Rect,
) where
    T: TaskHandle,
    M: GanttModel<T> + 'static,
    A: TaskAdapter<T> + 'static,
{
    let offset = origin.to_vec2();
    let renderers = chart.renderers();
    painter.rect_filled(visible.translate(offset), 0.0, theme::BG_DARK);

    let stride = chart.row_stride();
    let first_row = (visible.min.y / stride).floor().max(0.0) as i32;
    let last_row = ((visible.max.y / stride).ceil() as i32).min(chart.model().row_count());
    for row in first_row..last_row {
        renderers
            .row
            .paint_row(painter, row, chart.row_bounds(row).translate(offset));
    }

    for task in chart.tasks() {
        let bounds = chart.task_bounds(task);
        if !bounds.intersects(visible) {
            continue;
        }
        renderers.task.paint_task(
            painter,
            task,
            &chart.adapter().text(task),
            bounds.translate(offset),
            chart.is_task_selected(task),
        );
    }

    if let Some(links) = chart.links() {
        for link in (0..links.link_count()).filter_map(|i| links.link_at(i)) {
            renderers.link.paint_link(
                painter,
                link.kind,
                chart.task_bounds(&link.from).translate(offset),
                chart.task_bounds(&link.to).translate(offset),
            );
        }
    }

    handlers.paint_overlays(chart, painter, origin);
}

/// Draw the in-place label editor over its task, if a session is open.
fn show_text_editor<T, M, A>(chart: &mut GanttChart<T, M, A>, ui: &mut Ui, offset: Vec2)
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    let Some(task) = chart.text_edit().map(|session| session.task.clone()) else {
        return;
    };
    let bounds = chart.task_bounds(&task).translate(offset);

    let mut finished = None;
    if let Some(session) = chart.text_edit_mut() {
        let response = ui.put(
            bounds,
            TextEdit::singleline(&mut session.buffer)
                .horizontal_align(Align::Center)
                .font(theme::font_bar()),
        );
        if session.focus_pending {
            response.request_focus();
            session.focus_pending = false;
        } else if response.lost_focus() {
            let cancelled = ui.input(|i| i.key_pressed(Key::Escape));
            finished = Some(cancelled);
        }
    }

    match finished {
        Some(true) => chart.cancel_text_edit(),
        Some(false) => {
            chart.commit_text_edit();
        }
        None => {}
    }
}
