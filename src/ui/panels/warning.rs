// metamerge - ui/panels/warning.rs
//
// Blocking warning view shown when the backend reports that ExifTool is
// missing. Replaces the main view entirely; the link opens the ExifTool
// download page in the system browser.

use crate::util::constants::EXIFTOOL_URL;

/// Render the full-screen ExifTool warning.
pub fn render(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.heading("ExifTool was not found");
            ui.add_space(8.0);
            ui.label(
                "metamerge needs the ExifTool command-line tool to write \
                 metadata into your media files. Install it and restart \
                 the application.",
            );
            ui.add_space(12.0);
            ui.hyperlink_to("Get ExifTool", EXIFTOOL_URL);
        });
    });
}
