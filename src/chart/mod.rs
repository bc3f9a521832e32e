//! The chart component: model, adapter, selection, layout and the transient
//! interaction state shared by every handler.
//!
//! All coordinates here are chart-local: `(0, 0)` is the top-left corner of
//! the first row, below the header. The egui glue in [`crate::ui`] translates
//! to and from screen space.

pub mod box_select;
pub mod editor;
pub mod input;
pub mod keyboard;
pub mod link_editor;
pub mod selection;
pub mod text_edit;
pub mod undo;
pub mod zoom;

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::config::ChartConfig;
use crate::error::{GanttError, Result};
use crate::model::{
    CoordinateMapper, GanttModel, Link, LinkModel, ListenerId, Listeners, ModelEvent,
    TaskAdapter, TaskHandle,
};
use crate::ui::renderers::{LinkRenderer, Renderers, RowRenderer, TaskRenderer};

pub use input::{ChartCursor, ChartHandler, HandlerChain, KeyEvent, PointerEvent};
pub use selection::Selection;
pub use undo::{EditKind, GanttEdit, State, UndoLog};

pub const MIN_ZOOM: f64 = 0.05;
pub const MAX_ZOOM: f64 = 2000.0;
pub const ZOOM_STEP: f64 = 1.2;

/// The selection changed. Carries the number of selected tasks afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub selected: usize,
}

/// Something visible about the chart changed (task bounds, text, links).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub revision: u64,
}

/// An in-place text edit of one task's label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession<T> {
    pub task: T,
    pub buffer: String,
    /// Set until the host has given keyboard focus to the editor widget.
    pub focus_pending: bool,
}

pub struct GanttChart<T, M, A> {
    model: M,
    adapter: A,
    links: Option<Box<dyn LinkModel<T>>>,
    selection: Selection<T>,
    config: ChartConfig,
    undo_log: UndoLog<T>,
    renderers: Renderers<T>,

    range_min: i64,
    range_max: i64,
    container_width: Option<f32>,
    viewport: Option<Rect>,

    model_listeners: Listeners<ModelEvent>,
    selection_listeners: Listeners<SelectionEvent>,
    change_listeners: Listeners<ChangeEvent>,

    revision: u64,
    repaint_requested: bool,
    relayout_requested: bool,
    scroll_request: Option<Rect>,
    cursor: ChartCursor,
    text_edit: Option<TextEditSession<T>>,
}

impl<T, M, A> GanttChart<T, M, A>
where
    T: TaskHandle,
    M: GanttModel<T>,
    A: TaskAdapter<T>,
{
    pub fn new(model: M, adapter: A) -> Self {
        let config = ChartConfig::default();
        let mut chart = Self {
            model,
            adapter,
            links: None,
            selection: Selection::default(),
            undo_log: UndoLog::new(config.undo_limit),
            config,
            renderers: Renderers::default(),
            range_min: 0,
            range_max: 0,
            container_width: None,
            viewport: None,
            model_listeners: Listeners::default(),
            selection_listeners: Listeners::default(),
            change_listeners: Listeners::default(),
            revision: 0,
            repaint_requested: true,
            relayout_requested: true,
            scroll_request: None,
            cursor: ChartCursor::Default,
            text_edit: None,
        };
        chart.compute_range();
        chart
    }

    pub fn with_config(model: M, adapter: A, config: ChartConfig) -> Result<Self> {
        let mut chart = Self::new(model, adapter);
        chart.set_config(config)?;
        Ok(chart)
    }

    pub fn with_links(mut self, links: impl LinkModel<T> + 'static) -> Self {
        self.links = Some(Box::new(links));
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutating the model directly must be followed by
    /// [`fire_model_changed`](Self::fire_model_changed).
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn links(&self) -> Option<&dyn LinkModel<T>> {
        self.links.as_deref()
    }

    pub fn links_mut(&mut self) -> Option<&mut (dyn LinkModel<T> + 'static)> {
        self.links.as_deref_mut()
    }

    pub fn set_links(&mut self, links: Option<Box<dyn LinkModel<T>>>) {
        self.links = links;
        self.request_repaint();
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the configuration after validating it. The undo history is
    /// kept but trimmed lazily to the new limit on the next commit.
    pub fn set_config(&mut self, config: ChartConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            tracing::warn!("Rejected chart configuration: {}", err);
            return Err(err);
        }
        if config.undo_limit != self.config.undo_limit {
            self.undo_log = UndoLog::new(config.undo_limit);
        }
        self.config = config;
        self.request_relayout();
        self.request_repaint();
        Ok(())
    }

    pub fn set_fire_change_during_drag(&mut self, enabled: bool) {
        self.config.fire_change_during_drag = enabled;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Model tasks in model order.
    pub fn tasks(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.model.task_count()).filter_map(move |i| self.model.task_at(i))
    }

    pub fn contains_task(&self, task: &T) -> bool {
        self.tasks().any(|t| t == task)
    }

    // ── Listeners ────────────────────────────────────────────────────────────

    pub fn add_model_listener(&mut self, listener: impl FnMut(&ModelEvent) + 'static) -> ListenerId {
        self.model_listeners.add(listener)
    }

    pub fn remove_model_listener(&mut self, id: ListenerId) -> bool {
        self.model_listeners.remove(id)
    }

    pub fn add_selection_listener(
        &mut self,
        listener: impl FnMut(&SelectionEvent) + 'static,
    ) -> ListenerId {
        self.selection_listeners.add(listener)
    }

    pub fn remove_selection_listener(&mut self, id: ListenerId) -> bool {
        self.selection_listeners.remove(id)
    }

    pub fn add_change_listener(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) -> ListenerId {
        self.change_listeners.add(listener)
    }

    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        self.change_listeners.remove(id)
    }

    /// Bump the revision and notify change listeners.
    pub fn fire_change(&mut self) {
        self.revision += 1;
        let event = ChangeEvent {
            revision: self.revision,
        };
        self.change_listeners.fire(&event);
    }

    pub fn fire_selection_changed(&mut self) {
        let event = SelectionEvent {
            selected: self.selection.len(),
        };
        self.selection_listeners.fire(&event);
        self.request_repaint();
    }

    /// The model changed in `event`'s rows. Prunes the selection and any text
    /// edit of vanished tasks, then recomputes the visible range.
    pub fn fire_model_changed(&mut self, event: ModelEvent) {
        self.model_listeners.fire(&event);

        let model = &self.model;
        let pruned = self.selection.retain(|task| model_contains(model, task));
        if self
            .text_edit
            .as_ref()
            .is_some_and(|session| !model_contains(model, &session.task))
        {
            self.text_edit = None;
        }

        self.compute_range();
        self.request_relayout();
        self.request_repaint();
        self.fire_change();
        if pruned {
            self.fire_selection_changed();
        }
    }

    pub fn fire_model_changed_all(&mut self) {
        let rows = self.model.row_count();
        self.fire_model_changed(ModelEvent::all_rows(rows));
    }

    pub fn add_task(&mut self, task: T) {
        self.model.add_task(task);
        self.fire_model_changed_all();
    }

    /// Remove a task from the model along with every link touching it.
    pub fn remove_task(&mut self, task: &T) {
        self.model.remove_task(task);
        if let Some(links) = self.links.as_deref_mut() {
            let doomed: Vec<Link<T>> = (0..links.link_count())
                .filter_map(|i| links.link_at(i))
                .filter(|link| link.involves(task))
                .cloned()
                .collect();
            for link in &doomed {
                links.remove_link(link);
            }
        }
        self.fire_model_changed_all();
    }

    // ── Selection ────────────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    /// Batch access; call [`fire_selection_changed`](Self::fire_selection_changed)
    /// when done.
    pub fn selection_mut(&mut self) -> &mut Selection<T> {
        &mut self.selection
    }

    pub fn is_task_selected(&self, task: &T) -> bool {
        self.selection.contains(task)
    }

    /// Any one selected task.
    pub fn selected_task(&self) -> Option<&T> {
        self.selection.first()
    }

    pub fn select_task(&mut self, task: T) {
        self.selection.insert(task);
        self.fire_selection_changed();
    }

    pub fn unselect_task(&mut self, task: &T) {
        self.selection.remove(task);
        self.fire_selection_changed();
    }

    pub fn toggle_task_selection(&mut self, task: T) {
        self.selection.toggle(task);
        self.fire_selection_changed();
    }

    /// Replace the selection with exactly one task.
    pub fn select_only(&mut self, task: T) {
        self.selection.clear();
        self.selection.insert(task);
        self.fire_selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.fire_selection_changed();
    }

    /// Selected tasks sorted by model order, which is also paint order.
    pub fn selected_in_model_order(&self) -> Vec<T> {
        self.tasks()
            .filter(|task| self.selection.contains(task))
            .cloned()
            .collect()
    }

    // ── Range and layout ─────────────────────────────────────────────────────

    /// `(range_min, range_max)` over all tasks; `(0, 0)` for an empty model.
    pub fn range(&self) -> (i64, i64) {
        (self.range_min, self.range_max)
    }

    fn compute_range(&mut self) {
        let mut bounds: Option<(i64, i64)> = None;
        for task in self.tasks() {
            let start = self.adapter.start(task);
            let end = self.adapter.end(task);
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }
        let (min, max) = bounds.unwrap_or((0, 0));
        self.range_min = min;
        self.range_max = max.max(min);
    }

    /// Recompute the range after task bounds changed. Returns whether it moved.
    pub fn resize(&mut self) -> bool {
        let before = self.range();
        self.compute_range();
        let changed = before != self.range();
        if changed {
            self.request_relayout();
        }
        changed
    }

    /// Width of the scroll viewport hosting the chart, if any.
    pub fn set_container_width(&mut self, width: Option<f32>) {
        if self.container_width != width {
            self.container_width = width;
            self.request_relayout();
        }
    }

    /// `zoom × container width` inside a viewport, the intrinsic width
    /// otherwise; `row_count × row stride` tall.
    pub fn preferred_size(&self) -> Vec2 {
        let width = match self.container_width {
            Some(container) => (self.config.zoom * container as f64) as f32,
            None => self.config.intrinsic_width,
        };
        let height = self.model.row_count().max(0) as f32 * self.config.row_stride();
        vec2(width, height)
    }

    pub fn width(&self) -> f32 {
        self.preferred_size().x
    }

    pub fn height(&self) -> f32 {
        self.preferred_size().y
    }

    /// The part of the chart currently shown by the host, in chart-local
    /// coordinates. Without a host viewport the whole chart counts as visible.
    pub fn visible_rect(&self) -> Rect {
        self.viewport
            .unwrap_or_else(|| Rect::from_min_size(Pos2::ZERO, self.preferred_size()))
    }

    pub fn set_visible_rect(&mut self, rect: Option<Rect>) {
        self.viewport = rect;
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.range_min, self.range_max, self.width() as f64).with_insets(
            self.config.row_insets.left as f64,
            self.config.row_insets.right as f64,
        )
    }

    pub fn canonical_to_screen(&self, value: i64) -> f64 {
        self.mapper().canonical_to_screen(value)
    }

    pub fn screen_to_canonical(&self, x: f64) -> i64 {
        self.mapper().screen_to_canonical(x)
    }

    pub fn row_stride(&self) -> f32 {
        self.config.row_stride()
    }

    /// Row under a vertical position, `None` outside the chart.
    pub fn row_at(&self, y: f32) -> Option<i32> {
        if y < 0.0 || y > self.height() {
            return None;
        }
        let row = (y / self.row_stride()) as i32;
        (row < self.model.row_count()).then_some(row)
    }

    /// The full-width band of a row, insets included.
    pub fn row_bounds(&self, row: i32) -> Rect {
        let stride = self.row_stride();
        Rect::from_min_size(pos2(0.0, row as f32 * stride), vec2(self.width(), stride))
    }

    /// The bar rectangle of a task.
    pub fn task_bounds(&self, task: &T) -> Rect {
        let mapper = self.mapper();
        let x0 = mapper.canonical_to_screen(self.adapter.start(task)) as f32;
        let x1 = mapper.canonical_to_screen(self.adapter.end(task)) as f32;
        let top = self.adapter.row(task) as f32 * self.row_stride() + self.config.row_insets.top;
        Rect::from_min_max(pos2(x0, top), pos2(x1.max(x0), top + self.config.row_height))
    }

    /// Topmost task under `pos`. Selected tasks win over unselected ones,
    /// then later model entries over earlier ones.
    pub fn task_at_point(&self, pos: Pos2) -> Option<T> {
        let hit = |task: &&T| self.task_bounds(task).contains(pos);
        self.tasks_topmost_first()
            .filter(|task| self.selection.contains(task))
            .find(hit)
            .or_else(|| self.tasks_topmost_first().find(hit))
            .cloned()
    }

    fn tasks_topmost_first(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.model.task_count())
            .rev()
            .filter_map(move |i| self.model.task_at(i))
    }

    /// Tasks whose bars intersect `rect`, in model order.
    pub fn tasks_in_rect(&self, rect: Rect) -> Vec<T> {
        self.tasks()
            .filter(|task| self.task_bounds(task).intersects(rect))
            .cloned()
            .collect()
    }

    pub fn tooltip_at(&self, pos: Pos2) -> Option<String> {
        self.task_at_point(pos)
            .and_then(|task| self.adapter.tooltip_text(&task))
    }

    // ── Zoom ─────────────────────────────────────────────────────────────────

    pub fn zoom(&self) -> f64 {
        self.config.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(GanttError::InvalidZoom(zoom));
        }
        if zoom != self.config.zoom {
            tracing::debug!(from = self.config.zoom, to = zoom, "zoom changed");
            self.config.zoom = zoom;
            self.request_relayout();
            self.request_repaint();
        }
        Ok(())
    }

    pub fn zoom_in(&mut self) {
        let zoom = (self.config.zoom * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
        let _ = self.set_zoom(zoom);
    }

    pub fn zoom_out(&mut self) {
        let zoom = (self.config.zoom / ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
        let _ = self.set_zoom(zoom);
    }

    pub fn reset_zoom(&mut self) {
        let _ = self.set_zoom(1.0);
    }

    // ── Undo ─────────────────────────────────────────────────────────────────

    /// Record a finished edit in the undo log.
    pub fn commit_edit(&mut self, edit: GanttEdit<T>) -> Result<()> {
        let kind = edit.kind();
        let tasks = edit.edited_tasks().len();
        self.undo_log.add_edit(edit)?;
        tracing::debug!(?kind, tasks, "committed edit");
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.undo_log.undo(&mut self.adapter)?;
        tracing::debug!("undo");
        self.after_history_step();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.undo_log.redo(&mut self.adapter)?;
        tracing::debug!("redo");
        self.after_history_step();
        Ok(())
    }

    fn after_history_step(&mut self) {
        self.resize();
        self.request_repaint();
        self.fire_change();
    }

    pub fn can_undo(&self) -> bool {
        self.undo_log.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_log.can_redo()
    }

    pub fn undo_log(&self) -> &UndoLog<T> {
        &self.undo_log
    }

    // ── Renderers ────────────────────────────────────────────────────────────

    pub fn renderers(&self) -> &Renderers<T> {
        &self.renderers
    }

    pub fn set_task_renderer(&mut self, renderer: impl TaskRenderer<T> + 'static) {
        self.renderers.task = Box::new(renderer);
        self.request_repaint();
    }

    pub fn set_link_renderer(&mut self, renderer: impl LinkRenderer + 'static) {
        self.renderers.link = Box::new(renderer);
        self.request_repaint();
    }

    pub fn set_row_renderer(&mut self, renderer: impl RowRenderer + 'static) {
        self.renderers.row = Box::new(renderer);
        self.request_repaint();
    }

    // ── Transient requests ───────────────────────────────────────────────────

    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    pub fn request_relayout(&mut self) {
        self.relayout_requested = true;
    }

    pub fn take_relayout_request(&mut self) -> bool {
        std::mem::take(&mut self.relayout_requested)
    }

    /// Ask the host to scroll so `rect` becomes visible. The tracked visible
    /// rect is moved immediately by the smallest amount that shows it.
    pub fn scroll_rect_to_visible(&mut self, rect: Rect) {
        if let Some(view) = self.viewport {
            let size = self.preferred_size();
            let dx = scroll_delta(view.min.x, view.max.x, rect.min.x, rect.max.x);
            let dy = scroll_delta(view.min.y, view.max.y, rect.min.y, rect.max.y);
            let max_x = (size.x - view.width()).max(0.0);
            let max_y = (size.y - view.height()).max(0.0);
            let min = pos2(
                (view.min.x + dx).clamp(0.0, max_x),
                (view.min.y + dy).clamp(0.0, max_y),
            );
            self.viewport = Some(Rect::from_min_size(min, view.size()));
        }
        self.scroll_request = Some(rect);
    }

    pub fn take_scroll_request(&mut self) -> Option<Rect> {
        self.scroll_request.take()
    }

    pub fn cursor(&self) -> ChartCursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: ChartCursor) {
        self.cursor = cursor;
    }

    // ── In-place text editing ────────────────────────────────────────────────

    pub fn begin_text_edit(&mut self, task: T) {
        let buffer = self.adapter.text(&task);
        self.text_edit = Some(TextEditSession {
            task,
            buffer,
            focus_pending: true,
        });
        self.request_repaint();
    }

    pub fn text_edit(&self) -> Option<&TextEditSession<T>> {
        self.text_edit.as_ref()
    }

    pub fn text_edit_mut(&mut self) -> Option<&mut TextEditSession<T>> {
        self.text_edit.as_mut()
    }

    pub fn is_editing_text(&self) -> bool {
        self.text_edit.is_some()
    }

    /// Write the edited text through the adapter. Returns whether a session
    /// was open.
    pub fn commit_text_edit(&mut self) -> bool {
        let Some(session) = self.text_edit.take() else {
            return false;
        };
        self.adapter.set_text(&session.task, session.buffer);
        self.request_repaint();
        self.fire_change();
        true
    }

    pub fn cancel_text_edit(&mut self) {
        if self.text_edit.take().is_some() {
            self.request_repaint();
        }
    }
}

fn model_contains<T: PartialEq, M: GanttModel<T>>(model: &M, task: &T) -> bool {
    (0..model.task_count()).any(|i| model.task_at(i) == Some(task))
}

/// Smallest shift of `[view_min, view_max]` that shows `[min, max]`,
/// preferring the leading edge when the target is wider than the view.
fn scroll_delta(view_min: f32, view_max: f32, min: f32, max: f32) -> f32 {
    if min < view_min || max - min > view_max - view_min {
        min - view_min
    } else if max > view_max {
        max - view_max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RowInsets, DAY_MILLIS};
    use crate::model::{BasicGanttModel, BasicLinkModel, LinkType, RecordAdapter, TaskRecord};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Chart = GanttChart<u32, BasicGanttModel<u32>, RecordAdapter<u32>>;

    fn chart() -> Chart {
        let mut adapter = RecordAdapter::new();
        adapter.insert(1, TaskRecord::new("A", 0, 2 * DAY_MILLIS, 0).with_tooltip("first"));
        adapter.insert(2, TaskRecord::new("B", 5 * DAY_MILLIS, 7 * DAY_MILLIS, 1));
        let config = ChartConfig {
            row_insets: RowInsets::ZERO,
            ..ChartConfig::default()
        };
        let mut chart =
            GanttChart::with_config(BasicGanttModel::new(vec![1, 2]), adapter, config).unwrap();
        chart.set_container_width(Some(200.0));
        chart
    }

    #[test]
    fn range_spans_all_tasks() {
        let chart = chart();
        assert_eq!(chart.range(), (0, 7 * DAY_MILLIS));
        assert!((chart.canonical_to_screen(7 * DAY_MILLIS) - 200.0).abs() < 1e-9);
        assert_eq!(chart.preferred_size(), vec2(200.0, 40.0));
    }

    #[test]
    fn empty_model_collapses_range() {
        let chart: Chart = GanttChart::new(BasicGanttModel::new(vec![]), RecordAdapter::new());
        assert_eq!(chart.range(), (0, 0));
        assert!(chart.task_at_point(pos2(1.0, 1.0)).is_none());
        assert_eq!(chart.row_at(0.0), None);
    }

    #[test]
    fn row_lookup_respects_bounds() {
        let chart = chart();
        assert_eq!(chart.row_at(-1.0), None);
        assert_eq!(chart.row_at(5.0), Some(0));
        assert_eq!(chart.row_at(25.0), Some(1));
        assert_eq!(chart.row_at(40.0), None);
        assert_eq!(chart.row_at(41.0), None);
    }

    #[test]
    fn hit_testing_prefers_selected_then_topmost() {
        let mut adapter = RecordAdapter::new();
        adapter.insert(1, TaskRecord::new("under", 0, 10, 0));
        adapter.insert(2, TaskRecord::new("over", 0, 10, 0));
        let mut chart = GanttChart::new(BasicGanttModel::new(vec![1, 2]), adapter);
        let inside = pos2(50.0, 10.0);
        assert_eq!(chart.task_at_point(inside), Some(2));
        chart.select_task(1);
        assert_eq!(chart.task_at_point(inside), Some(1));
    }

    #[test]
    fn removing_a_task_prunes_selection_and_links() {
        let mut links = BasicLinkModel::new();
        links.link(1, 2, LinkType::FinishToStart);
        let mut chart = chart().with_links(links);
        chart.select_task(2);

        let events = Rc::new(RefCell::new(Vec::new()));
        {
            let events = events.clone();
            chart.add_selection_listener(move |e| events.borrow_mut().push(e.selected));
        }
        chart.remove_task(&2);

        assert!(chart.selection().is_empty());
        assert_eq!(chart.links().map(|l| l.link_count()), Some(0));
        assert_eq!(*events.borrow(), vec![0]);
        assert_eq!(chart.range(), (0, 2 * DAY_MILLIS));
    }

    #[test]
    fn model_change_without_pruning_fires_no_selection_event() {
        let mut chart = chart();
        chart.select_task(1);
        let fired = Rc::new(RefCell::new(0));
        {
            let fired = fired.clone();
            chart.add_selection_listener(move |_| *fired.borrow_mut() += 1);
        }
        let revision = chart.revision();
        chart.fire_model_changed_all();
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(chart.revision(), revision + 1);
    }

    #[test]
    fn zoom_validation_and_steps() {
        let mut chart = chart();
        assert!(matches!(chart.set_zoom(0.0), Err(GanttError::InvalidZoom(_))));
        assert!(chart.set_zoom(f64::NAN).is_err());
        chart.zoom_in();
        assert!((chart.zoom() - 1.2).abs() < 1e-12);
        assert!((chart.width() - 240.0).abs() < 1e-3);
        chart.reset_zoom();
        assert_eq!(chart.zoom(), 1.0);
        chart.set_zoom(MAX_ZOOM).unwrap();
        chart.zoom_in();
        assert_eq!(chart.zoom(), MAX_ZOOM);
    }

    #[test]
    fn scrolling_moves_the_tracked_viewport() {
        let mut chart = chart();
        chart.set_zoom(2.0).unwrap();
        chart.set_visible_rect(Some(Rect::from_min_size(Pos2::ZERO, vec2(100.0, 40.0))));
        chart.scroll_rect_to_visible(Rect::from_min_max(pos2(150.0, 0.0), pos2(160.0, 10.0)));
        assert_eq!(chart.visible_rect().min.x, 60.0);
        assert!(chart.take_scroll_request().is_some());
        assert!(chart.take_scroll_request().is_none());
    }

    #[test]
    fn text_edit_commits_through_adapter() {
        let mut chart = chart();
        chart.begin_text_edit(1);
        assert_eq!(chart.text_edit().map(|s| s.buffer.as_str()), Some("A"));
        if let Some(session) = chart.text_edit_mut() {
            session.buffer = "Renamed".to_string();
        }
        assert!(chart.commit_text_edit());
        assert_eq!(chart.adapter().text(&1), "Renamed");
        assert!(!chart.commit_text_edit());
    }

    #[test]
    fn tooltip_comes_from_adapter() {
        let chart = chart();
        assert_eq!(chart.tooltip_at(pos2(10.0, 10.0)).as_deref(), Some("first"));
        assert_eq!(chart.tooltip_at(pos2(150.0, 30.0)), None);
    }
}
