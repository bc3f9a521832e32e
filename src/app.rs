use egui_gantt::model::{
    BasicGanttModel, BasicLinkModel, Calendar, Granularity, LinkType, RecordAdapter, TaskRecord,
};
use egui_gantt::ui::{self, theme};
use egui_gantt::{GanttChart, HandlerChain, DAY_MILLIS};
use rand::Rng;
use uuid::Uuid;

use crate::toolbar;

pub type DemoModel = BasicGanttModel<Uuid>;
pub type DemoAdapter = RecordAdapter<Uuid>;
pub type DemoChart = GanttChart<Uuid, DemoModel, DemoAdapter>;

const SAMPLE_TASKS: usize = 20;

const SAMPLE_NAMES: [&str; 10] = [
    "Kickoff",
    "Requirements",
    "UI Design",
    "Prototype",
    "Backend",
    "Integration",
    "Testing",
    "Documentation",
    "Review",
    "Release",
];

/// Main application state.
pub struct DemoApp {
    pub chart: DemoChart,
    handlers: HandlerChain<Uuid, DemoModel, DemoAdapter>,
    calendar: Calendar,
    pub status_message: String,
}

impl DemoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        theme::apply_theme(&cc.egui_ctx);

        let calendar = Calendar::Local;
        let mut chart = Self::sample_chart(calendar);
        chart.add_change_listener(|event| {
            tracing::debug!(revision = event.revision, "chart changed");
        });
        chart.add_selection_listener(|event| {
            tracing::debug!(selected = event.selected, "selection changed");
        });
        tracing::info!(tasks = SAMPLE_TASKS, "demo chart ready");

        Self {
            chart,
            handlers: HandlerChain::standard(calendar),
            calendar,
            status_message: "Ready".to_string(),
        }
    }

    /// Random tasks over the coming month, one per row, with a few links
    /// between neighbours.
    fn sample_chart(calendar: Calendar) -> DemoChart {
        let today = calendar.truncate(chrono::Utc::now().timestamp_millis(), Granularity::Day);
        let mut rng = rand::thread_rng();

        let mut adapter = RecordAdapter::new();
        let mut tasks = Vec::with_capacity(SAMPLE_TASKS);
        for index in 0..SAMPLE_TASKS {
            let id = Uuid::new_v4();
            let start = today + rng.gen_range(0..30i64) * DAY_MILLIS;
            let end = start + rng.gen_range(1..=10i64) * DAY_MILLIS;
            let name = SAMPLE_NAMES[index % SAMPLE_NAMES.len()];
            let record = TaskRecord::new(format!("{} {}", name, index + 1), start, end, index as i32)
                .with_tooltip(format!(
                    "{}\n{} – {}",
                    name,
                    calendar.format(start, "%Y-%m-%d"),
                    calendar.format(end, "%Y-%m-%d"),
                ));
            adapter.insert(id, record);
            tasks.push(id);
        }

        let mut links = BasicLinkModel::new();
        for pair in tasks.windows(2) {
            if rng.gen_bool(1.0 / 3.0) {
                links.link(pair[0], pair[1], LinkType::FinishToStart);
            }
        }

        let model = BasicGanttModel::new(tasks).with_row_count(SAMPLE_TASKS as i32 + 2);
        GanttChart::new(model, adapter).with_links(links)
    }

    // --- Edit operations ---

    pub fn undo(&mut self) {
        self.status_message = match self.chart.undo() {
            Ok(()) => "Undo".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn redo(&mut self) {
        self.status_message = match self.chart.redo() {
            Ok(()) => "Redo".to_string(),
            Err(e) => e.to_string(),
        };
    }

    pub fn clear_selection(&mut self) {
        self.chart.clear_selection();
        self.status_message = "Selection cleared".to_string();
    }

    pub fn delete_selected(&mut self) {
        let selected = self.chart.selected_in_model_order();
        for task in &selected {
            self.chart.remove_task(task);
            self.chart.adapter_mut().remove(task);
        }
        self.status_message = format!("Deleted {} task(s)", selected.len());
    }

    // --- View operations ---

    pub fn zoom_in(&mut self) {
        self.chart.zoom_in();
        self.report_zoom();
    }

    pub fn zoom_out(&mut self) {
        self.chart.zoom_out();
        self.report_zoom();
    }

    pub fn reset_zoom(&mut self) {
        self.chart.reset_zoom();
        self.report_zoom();
    }

    fn report_zoom(&mut self) {
        self.status_message = format!("Zoom {:.0}%", self.chart.zoom() * 100.0);
    }

    fn describe_change(&self) -> String {
        let Some(record) = self
            .chart
            .selected_task()
            .and_then(|task| self.chart.adapter().get(task))
        else {
            return "Timeline updated".to_string();
        };
        format!(
            "Updated '{}' ({} → {})",
            record.text,
            self.calendar.format(record.start, "%Y-%m-%d"),
            self.calendar.format(record.end, "%Y-%m-%d"),
        )
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts outside closures to avoid borrow issues
        if !ctx.wants_keyboard_input() {
            let (should_undo, should_redo) = ctx.input(|i| {
                let command = i.modifiers.command;
                (
                    command && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                    command
                        && (i.key_pressed(egui::Key::Y)
                            || (i.modifiers.shift && i.key_pressed(egui::Key::Z))),
                )
            });
            if should_undo {
                self.undo();
            }
            if should_redo {
                self.redo();
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(theme::font_small())
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Zoom: {:.0}%", self.chart.zoom() * 100.0))
                                .font(theme::font_small())
                                .color(theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .font(theme::font_small())
                                .color(theme::TEXT_SECONDARY),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Selected: {}",
                                self.chart.selection().len()
                            ))
                            .font(theme::font_small())
                            .color(theme::TEXT_SECONDARY),
                        );
                    });
                });
            });

        let chart_frame = egui::Frame::default()
            .fill(theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction =
                ui::show_gantt_chart(&mut self.chart, &mut self.handlers, self.calendar, ui);
            if interaction.changed {
                self.status_message = self.describe_change();
            }
        });
    }
}
