// metamerge - ui/panels/settings.rs
//
// Merge settings form. Every control is keyed by the settings-document
// field id it mirrors; a change mutates the mirror and queues one push of
// the full document (drained by the gui update loop).
//
// Controls render from the mirror each frame, so the startup fetch
// populating the mirror is all it takes to populate the form.

use crate::app::state::AppState;
use crate::core::settings::FieldValue;
use crate::ui::theme;

/// Text-input controls: (field id, label).
const TEXT_CONTROLS: &[(&str, &str)] = &[
    ("editedSuffix", "Edited-file suffix"),
    ("timezoneOffset", "Timezone offset"),
];

/// Checkbox controls: (field id, label).
const CHECKBOX_CONTROLS: &[(&str, &str)] = &[
    ("ignoreMinorErrors", "Ignore minor errors"),
    ("inferTimezoneFromGPS", "Infer timezone from GPS"),
    ("overwriteExistingTags", "Overwrite existing tags"),
];

/// ExifTag checkbox controls: (tag id, label).
const TAG_CONTROLS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("description", "Description"),
    ("dateTaken", "Date taken"),
    ("URL", "URL"),
    ("GPS", "GPS"),
];

/// Render the settings form into the given `Ui`.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.set_max_width(theme::SETTINGS_FORM_WIDTH);

    ui.heading("Merge settings");
    ui.add_space(4.0);
    if !state.settings_sync.is_loaded() {
        ui.label(
            egui::RichText::new("Loading settings\u{2026}")
                .small()
                .weak(),
        );
        ui.add_space(4.0);
    }

    // ---- General settings ----
    egui::Grid::new("general_settings")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for (id, label) in TEXT_CONTROLS {
                ui.label(*label);
                let mut text = state
                    .settings_sync
                    .display_value(id)
                    .map(FieldValue::display_text)
                    .unwrap_or_default();
                if ui.text_edit_singleline(&mut text).changed() {
                    queue_edit(state, id, FieldValue::Text(text));
                }
                ui.end_row();
            }

            for (id, label) in CHECKBOX_CONTROLS {
                ui.label(*label);
                let mut checked = state
                    .settings_sync
                    .display_value(id)
                    .and_then(FieldValue::as_bool)
                    .unwrap_or(false);
                if ui.checkbox(&mut checked, "").changed() {
                    queue_edit(state, id, FieldValue::Bool(checked));
                }
                ui.end_row();
            }
        });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(6.0);

    // ---- Tags to merge ----
    ui.heading("Tags to merge");
    ui.add_space(2.0);
    ui.label(
        egui::RichText::new("Which Takeout metadata fields are written into the files.")
            .small()
            .weak(),
    );
    ui.add_space(6.0);

    for (id, label) in TAG_CONTROLS {
        let mut checked = state.settings_sync.tag_checked(id).unwrap_or(false);
        if ui.checkbox(&mut checked, *label).changed() {
            queue_edit(state, id, FieldValue::Bool(checked));
        }
    }
}

/// Apply one control edit to the mirror and queue a push of the full
/// post-edit document. One edit, one push -- no coalescing.
fn queue_edit(state: &mut AppState, id: &str, value: FieldValue) {
    let snapshot = state.settings_sync.edit(id, value);
    state.pending_pushes.push(snapshot);
}
