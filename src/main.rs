#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod toolbar;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 360.0])
            .with_title("egui-gantt demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui-gantt demo",
        options,
        Box::new(|cc| Ok(Box::new(app::DemoApp::new(cc)))),
    )
}
