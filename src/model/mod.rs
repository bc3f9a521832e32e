pub mod calendar;
pub mod gantt_model;
pub mod link;
pub mod listeners;
pub mod task;
pub mod timeline;

pub use calendar::{Calendar, Granularity};
pub use gantt_model::{BasicGanttModel, GanttModel, ModelEvent};
pub use link::{BasicLinkModel, Link, LinkModel, LinkType};
pub use listeners::{ListenerId, Listeners};
pub use task::{RecordAdapter, TaskAdapter, TaskHandle, TaskRecord};
pub use timeline::CoordinateMapper;
