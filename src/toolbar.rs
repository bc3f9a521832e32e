use egui::{menu, RichText, Ui};
use egui_phosphor::regular;

use crate::app::DemoApp;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut DemoApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  Edit  ", |ui| {
            let undo = format!("{}  Undo          Ctrl+Z", regular::ARROW_COUNTER_CLOCKWISE);
            if ui
                .add_enabled(app.chart.can_undo(), egui::Button::new(undo))
                .clicked()
            {
                app.undo();
                ui.close_menu();
            }
            let redo = format!("{}  Redo          Ctrl+Y", regular::ARROW_CLOCKWISE);
            if ui
                .add_enabled(app.chart.can_redo(), egui::Button::new(redo))
                .clicked()
            {
                app.redo();
                ui.close_menu();
            }
            ui.separator();
            let has_selection = !app.chart.selection().is_empty();
            if ui
                .add_enabled(
                    has_selection,
                    egui::Button::new(format!("{}  Clear Selection", regular::X)),
                )
                .clicked()
            {
                app.clear_selection();
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    has_selection,
                    egui::Button::new(format!("{}  Delete Selected", regular::TRASH)),
                )
                .clicked()
            {
                app.delete_selected();
                ui.close_menu();
            }
        });

        ui.menu_button("  View  ", |ui| {
            if ui
                .button(format!("{}  Zoom In        Ctrl+Scroll ↑", regular::MAGNIFYING_GLASS_PLUS))
                .clicked()
            {
                app.zoom_in();
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Zoom Out      Ctrl+Scroll ↓", regular::MAGNIFYING_GLASS_MINUS))
                .clicked()
            {
                app.zoom_out();
                ui.close_menu();
            }
            if ui
                .button(format!("{}  Reset Zoom", regular::MAGNIFYING_GLASS))
                .clicked()
            {
                app.reset_zoom();
                ui.close_menu();
            }
            ui.separator();
            ui.label(
                RichText::new("Right-drag on empty space to zoom to a span")
                    .small()
                    .weak(),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} tasks", app.chart.tasks().count()))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
