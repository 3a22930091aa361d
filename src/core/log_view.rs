// metamerge - core/log_view.rs
//
// The log area's state: an append-only (until cleared) history of backend
// log records, a collapsed/expanded display mode, and the visibility
// lifecycle of the clear/copy/collapse affordances.
//
// Pure state + projection; rendering the widgets and delivering exported
// text to the clipboard are the UI layer's job.

use crate::core::model::{DisplayMode, LogRecord};
use crate::util::constants::MAX_LOG_HISTORY;

/// Visibility of the log area's auxiliary controls.
///
/// All hidden at startup. The first append reveals clear and copy;
/// expanding reveals collapse; clearing reverts everything to hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AffordanceVisibility {
    /// "Clear log" control.
    pub clear: bool,
    /// "Copy log" control.
    pub copy: bool,
    /// "Hide log" (collapse) control.
    pub collapse: bool,
}

/// Log aggregator: ordered history plus display mode.
///
/// Mutated only by `append` and `clear`; `expand`/`collapse` touch the
/// display mode alone. All handlers run to completion on the UI thread,
/// so no locking is involved.
#[derive(Debug, Default)]
pub struct LogView {
    history: Vec<LogRecord>,
    mode: DisplayMode,
    affordances: AffordanceVisibility,
}

impl LogView {
    /// Create an empty log view in collapsed mode with hidden affordances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record stamped with the current local time.
    ///
    /// Reveals the clear and copy controls; revealing is idempotent, so
    /// subsequent appends are no-ops on already-visible affordances.
    pub fn append(&mut self, level: impl Into<String>, message: impl Into<String>) {
        self.append_record(LogRecord::now(level, message));
    }

    /// Append a pre-built record (timestamp supplied by the caller).
    pub fn append_record(&mut self, record: LogRecord) {
        // Retention cap: drop the oldest record rather than grow forever.
        if self.history.len() >= MAX_LOG_HISTORY {
            self.history.remove(0);
        }
        self.history.push(record);
        self.affordances.clear = true;
        self.affordances.copy = true;
    }

    /// Switch to expanded mode and reveal the collapse control.
    /// No-op if already expanded.
    pub fn expand(&mut self) {
        self.mode = DisplayMode::Expanded;
        self.affordances.collapse = true;
    }

    /// Switch back to collapsed (latest-only) mode and hide the collapse
    /// control. History is untouched.
    pub fn collapse(&mut self) {
        self.mode = DisplayMode::Collapsed;
        self.affordances.collapse = false;
    }

    /// Empty the history and hide all affordances (initial-state
    /// visibility). The display mode is left as-is.
    pub fn clear(&mut self) {
        self.history.clear();
        self.affordances = AffordanceVisibility::default();
    }

    /// The records currently visible under the active display mode:
    /// collapsed → at most the latest record; expanded → the full history
    /// in chronological order.
    pub fn visible(&self) -> &[LogRecord] {
        match self.mode {
            DisplayMode::Expanded => &self.history,
            DisplayMode::Collapsed => self
                .history
                .last()
                .map(std::slice::from_ref)
                .unwrap_or(&[]),
        }
    }

    /// Pure projection of (history, mode) to formatted display lines.
    pub fn render(&self) -> Vec<String> {
        self.visible().iter().map(LogRecord::display_line).collect()
    }

    /// The full history formatted one line per record, independent of the
    /// current display mode. The caller delivers the text to the clipboard
    /// sink; a delivery failure never affects this state.
    pub fn export_as_text(&self) -> String {
        self.history
            .iter()
            .map(LogRecord::display_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Whether the view is in expanded mode.
    pub fn is_expanded(&self) -> bool {
        self.mode == DisplayMode::Expanded
    }

    /// Current affordance visibility.
    pub fn affordances(&self) -> AffordanceVisibility {
        self.affordances
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn record_at(level: &str, message: &str, secs: u32) -> LogRecord {
        LogRecord {
            level: level.to_string(),
            message: message.to_string(),
            timestamp: Local.with_ymd_and_hms(2025, 6, 1, 8, 30, secs).unwrap(),
        }
    }

    #[test]
    fn test_new_view_renders_nothing_and_hides_affordances() {
        let view = LogView::new();
        assert!(view.render().is_empty());
        assert_eq!(view.affordances(), AffordanceVisibility::default());
        assert!(!view.is_expanded());
    }

    /// Collapsed mode shows exactly the most recent record.
    #[test]
    fn test_collapsed_shows_latest_only() {
        let mut view = LogView::new();
        view.append_record(record_at("info", "started", 1));
        view.append_record(record_at("error", "failed", 2));

        let lines = view.render();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("[ERROR] failed"), "got: {}", lines[0]);
    }

    /// Expanded mode shows the full history in append order.
    #[test]
    fn test_expanded_shows_full_history_in_order() {
        let mut view = LogView::new();
        view.append_record(record_at("info", "started", 1));
        view.append_record(record_at("error", "failed", 2));
        view.expand();

        let lines = view.render();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] started"));
        assert!(lines[1].ends_with("[ERROR] failed"));
    }

    #[test]
    fn test_append_reveals_clear_and_copy_once() {
        let mut view = LogView::new();
        view.append("info", "first");
        let after_first = view.affordances();
        assert!(after_first.clear && after_first.copy);
        assert!(!after_first.collapse);

        // Idempotent: a second append changes nothing.
        view.append("info", "second");
        assert_eq!(view.affordances(), after_first);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut view = LogView::new();
        view.append("info", "one");
        view.expand();
        let snapshot = (view.mode(), view.affordances(), view.render());
        view.expand();
        assert_eq!((view.mode(), view.affordances(), view.render()), snapshot);
    }

    #[test]
    fn test_collapse_hides_collapse_affordance_and_keeps_history() {
        let mut view = LogView::new();
        view.append("info", "one");
        view.append("info", "two");
        view.expand();
        view.collapse();

        assert!(!view.is_expanded());
        assert!(!view.affordances().collapse);
        // Clear/copy stay visible -- collapse never mutates history state.
        assert!(view.affordances().clear);
        assert_eq!(view.len(), 2);
    }

    /// Clear empties the display under either mode and reverts affordances.
    #[test]
    fn test_clear_empties_and_reverts_affordances() {
        let mut view = LogView::new();
        view.append("info", "one");
        view.expand();
        view.clear();

        assert!(view.render().is_empty());
        assert_eq!(view.affordances(), AffordanceVisibility::default());

        view.collapse();
        assert!(view.render().is_empty());
    }

    /// Export covers the whole history in call order regardless of mode.
    #[test]
    fn test_export_ignores_display_mode() {
        let mut view = LogView::new();
        view.append_record(record_at("info", "started", 1));
        view.append_record(record_at("warning", "slow", 2));
        view.append_record(record_at("error", "failed", 3));

        let collapsed_export = view.export_as_text();
        view.expand();
        assert_eq!(view.export_as_text(), collapsed_export);

        let lines: Vec<&str> = collapsed_export.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("[INFO] started"));
        assert!(lines[1].ends_with("[WARNING] slow"));
        assert!(lines[2].ends_with("[ERROR] failed"));
    }

    #[test]
    fn test_history_is_capped_oldest_first() {
        let mut view = LogView::new();
        for i in 0..MAX_LOG_HISTORY + 5 {
            view.append("info", format!("line {i}"));
        }
        assert_eq!(view.len(), MAX_LOG_HISTORY);
        view.expand();
        let lines = view.render();
        assert!(lines[0].ends_with("line 5"), "got: {}", lines[0]);
    }
}
