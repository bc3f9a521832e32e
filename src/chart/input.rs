//! Toolkit-neutral input events and the handler chain that consumes them.
//!
//! Handlers are invoked in registration order. Once a handler marks an event
//! consumed, later handlers skip it.

use egui::{Key, Modifiers, PointerButton, Pos2};

use super::GanttChart;
use crate::model::{GanttModel, TaskAdapter, TaskHandle};

/// A pointer event in chart-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    /// 1 for a single click, 2 for a double click, and so on. The egui glue
    /// only knows the count once the button is released, so presses carry 1.
    pub click_count: u32,
    consumed: bool,
}

impl PointerEvent {
    pub fn new(pos: Pos2, button: PointerButton) -> Self {
        Self {
            pos,
            button,
            modifiers: Modifiers::NONE,
            click_count: 1,
            consumed: false,
        }
    }

    pub fn primary(pos: Pos2) -> Self {
        Self::new(pos, PointerButton::Primary)
    }

    pub fn secondary(pos: Pos2) -> Self {
        Self::new(pos, PointerButton::Secondary)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    /// The selection-toggle modifier (Ctrl, or Cmd on macOS).
    pub fn toggle_modifier(&self) -> bool {
        self.modifiers.ctrl || self.modifiers.command
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// A key press delivered to the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    consumed: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            consumed: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Mouse cursor requested by the chart's handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartCursor {
    #[default]
    Default,
    ResizeWest,
    ResizeEast,
    Move,
    Crosshair,
}

impl From<ChartCursor> for egui::CursorIcon {
    fn from(cursor: ChartCursor) -> Self {
        match cursor {
            ChartCursor::Default => egui::CursorIcon::Default,
            ChartCursor::ResizeWest => egui::CursorIcon::ResizeWest,
            ChartCursor::ResizeEast => egui::CursorIcon::ResizeEast,
            ChartCursor::Move => egui::CursorIcon::Move,
            ChartCursor::Crosshair => egui::CursorIcon::Crosshair,
        }
    }
}

/// One interaction behaviour attached to a chart.
///
/// Every method defaults to doing nothing, so a handler only implements the
/// events it cares about.
pub trait ChartHandler<T, M, A> {
    fn pointer_pressed(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut PointerEvent) {}

    fn pointer_released(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut PointerEvent) {}

    /// Pointer moved while a button is held.
    fn pointer_dragged(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut PointerEvent) {}

    /// Pointer moved with no button held.
    fn pointer_moved(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut PointerEvent) {}

    /// Press and release without significant movement.
    fn pointer_clicked(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut PointerEvent) {}

    fn key_pressed(&mut self, _chart: &mut GanttChart<T, M, A>, _event: &mut KeyEvent) {}

    /// Draw transient feedback (drag rectangles, guide lines) on top of the
    /// chart. `origin` is the screen position of the chart's local origin.
    fn paint_overlay(
        &self,
        _chart: &GanttChart<T, M, A>,
        _painter: &egui::Painter,
        _origin: Pos2,
    ) {
    }
}

/// Ordered list of handlers receiving every event.
pub struct HandlerChain<T, M, A> {
    handlers: Vec<Box<dyn ChartHandler<T, M, A>>>,
}

impl<T, M, A> Default for HandlerChain<T, M, A> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<T, M, A> HandlerChain<T, M, A>
where
    T: TaskHandle,
    M: GanttModel<T> + 'static,
    A: TaskAdapter<T> + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The default behaviour set: box selection, link drawing, zoom
    /// rectangle, double-click rename, drag editing with undo and day
    /// snapping, then keyboard nudging.
    pub fn standard(calendar: crate::model::Calendar) -> Self {
        let mut chain = Self::new();
        chain.push(super::box_select::BoxSelectionHandler::new());
        chain.push(super::link_editor::LinkEditorHandler::new());
        chain.push(super::zoom::ZoomHandler::new());
        chain.push(super::text_edit::TextEditHandler::new());
        chain.push(super::editor::TaskEditor::new(
            super::editor::EditorOptions::default()
                .with_snap(super::editor::SnapPolicy::Day(calendar)),
        ));
        chain.push(super::keyboard::KeyboardEditor::new());
        chain
    }

    pub fn push(&mut self, handler: impl ChartHandler<T, M, A> + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        for handler in self.handlers.iter_mut() {
            handler.pointer_pressed(chart, event);
        }
    }

    pub fn released(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        for handler in self.handlers.iter_mut() {
            handler.pointer_released(chart, event);
        }
    }

    pub fn dragged(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        for handler in self.handlers.iter_mut() {
            handler.pointer_dragged(chart, event);
        }
    }

    pub fn moved(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        for handler in self.handlers.iter_mut() {
            handler.pointer_moved(chart, event);
        }
    }

    pub fn clicked(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut PointerEvent) {
        for handler in self.handlers.iter_mut() {
            handler.pointer_clicked(chart, event);
        }
    }

    pub fn key_pressed(&mut self, chart: &mut GanttChart<T, M, A>, event: &mut KeyEvent) {
        for handler in self.handlers.iter_mut() {
            handler.key_pressed(chart, event);
        }
    }

    pub fn paint_overlays(
        &self,
        chart: &GanttChart<T, M, A>,
        painter: &egui::Painter,
        origin: Pos2,
    ) {
        for handler in self.handlers.iter() {
            handler.paint_overlay(chart, painter, origin);
        }
    }
}
