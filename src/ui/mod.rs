pub mod gantt_chart;
pub mod header;
pub mod renderers;
pub mod text;
pub mod theme;

pub use gantt_chart::{paint_chart, show_gantt_chart, ChartInteraction};
