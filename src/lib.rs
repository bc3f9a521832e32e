//! An interactive Gantt chart widget for egui.
//!
//! Tasks are opaque handles read and written through a [`TaskAdapter`]; the
//! chart maps their millisecond time ranges onto a zoomable timeline, lets
//! the user move, resize and re-row them with the pointer or the keyboard,
//! draws links between them and keeps an undo log of every edit.
//!
//! ```no_run
//! use egui_gantt::{
//!     BasicGanttModel, Calendar, GanttChart, HandlerChain, RecordAdapter, TaskRecord, DAY_MILLIS,
//! };
//!
//! let mut adapter = RecordAdapter::new();
//! adapter.insert(1, TaskRecord::new("Design", 0, 3 * DAY_MILLIS, 0));
//! let mut chart = GanttChart::new(BasicGanttModel::new(vec![1]), adapter);
//! let mut handlers = HandlerChain::standard(Calendar::Local);
//! # let ui: &mut egui::Ui = unimplemented!();
//! egui_gantt::ui::show_gantt_chart(&mut chart, &mut handlers, Calendar::Local, ui);
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod model;
pub mod ui;

pub use chart::editor::{EditMode, EditorOptions, SnapPolicy, TaskEditor};
pub use chart::{
    ChangeEvent, ChartCursor, ChartHandler, EditKind, GanttChart, GanttEdit, HandlerChain,
    KeyEvent, PointerEvent, Selection, SelectionEvent, UndoLog,
};
pub use config::{ChartConfig, RowInsets, DAY_MILLIS};
pub use error::{GanttError, Result};
pub use model::{
    BasicGanttModel, BasicLinkModel, Calendar, CoordinateMapper, GanttModel, Granularity, Link,
    LinkModel, LinkType, ListenerId, ModelEvent, RecordAdapter, TaskAdapter, TaskHandle,
    TaskRecord,
};
