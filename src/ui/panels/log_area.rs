// metamerge - ui/panels/log_area.rs
//
// The log area: collapsed it shows the single latest backend log line,
// expanded it shows the full history in a scrollable list. Clicking the
// collapsed line expands; the "Hide log" control collapses. Clear/copy/
// hide controls appear and disappear per the view's affordance state.

use crate::app::state::AppState;
use crate::core::model::LogRecord;
use crate::ui::theme;

/// Render the log area into the given `Ui`.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // ---- Affordance row ----
    let affordances = state.log_view.affordances();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Log").strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if affordances.clear && ui.small_button("Clear").clicked() {
                state.log_view.clear();
            }
            if affordances.copy && ui.small_button("Copy").clicked() {
                let text = state.log_view.export_as_text();
                ui.ctx().copy_text(text);
                tracing::info!("Log copied to clipboard");
                state.status_message = "Log copied to clipboard.".to_string();
            }
            if affordances.collapse && ui.small_button("Hide log").clicked() {
                state.log_view.collapse();
            }
        });
    });

    // ---- Display list ----
    let expanded = state.log_view.is_expanded();
    let height = if expanded {
        theme::LOG_AREA_EXPANDED_HEIGHT
    } else {
        theme::LOG_AREA_COLLAPSED_HEIGHT
    };

    let response = ui
        .scope(|ui| {
            egui::ScrollArea::vertical()
                .id_salt("log_area")
                .max_height(height)
                .auto_shrink([false, !expanded])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for record in state.log_view.visible() {
                        log_line(ui, record);
                    }
                });
        })
        .response;

    // Click anywhere on the collapsed line to expand.
    if !expanded
        && response
            .interact(egui::Sense::click())
            .on_hover_text("Click to show the full log")
            .clicked()
    {
        state.log_view.expand();
    }
}

fn log_line(ui: &mut egui::Ui, record: &LogRecord) {
    ui.label(
        egui::RichText::new(record.display_line())
            .monospace()
            .color(theme::severity_colour(record.severity())),
    );
}
