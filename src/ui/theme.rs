// metamerge - ui/theme.rs
//
// Colour scheme, severity colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::Severity;
use egui::Color32;

/// Colour for a log line, from its severity category.
pub fn severity_colour(severity: Severity) -> Color32 {
    match severity {
        Severity::Error => Color32::from_rgb(220, 38, 38),   // Red 600
        Severity::Warning => Color32::from_rgb(217, 119, 6), // Amber 600
        Severity::Info => Color32::from_rgb(209, 213, 219),  // Gray 300
        Severity::Debug => Color32::from_rgb(107, 114, 128), // Gray 500
        Severity::Unknown => Color32::from_rgb(156, 163, 175), // Gray 400
    }
}

/// Layout constants.
pub const LOG_AREA_COLLAPSED_HEIGHT: f32 = 28.0;
pub const LOG_AREA_EXPANDED_HEIGHT: f32 = 240.0;
pub const SETTINGS_FORM_WIDTH: f32 = 420.0;
