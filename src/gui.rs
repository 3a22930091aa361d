// metamerge - gui.rs
//
// Top-level eframe::App implementation.
// Drains the backend event transport into the event bus, polls settings
// sync completions, drains pending pushes, and renders the panels.

use crate::app::bridge::BackendBridge;
use crate::app::events::EventBus;
use crate::app::state::AppState;
use crate::app::sync::SyncManager;
use crate::core::model::BackendEvent;
use crate::ui;
use crate::util::constants::{EVENT_EXIFTOOL_STATUS, EVENT_LOG, MAX_EVENTS_PER_FRAME};
use std::sync::mpsc;

/// How often the UI wakes to poll the transport and sync channels when no
/// input arrives.
const EVENT_POLL_INTERVAL_MS: u64 = 200;

/// The metamerge application.
pub struct MetamergeApp {
    pub state: AppState,
    bridge: BackendBridge,
    bus: EventBus,
    /// Typed events produced by the bus subscriptions, consumed per frame.
    typed_rx: mpsc::Receiver<BackendEvent>,
    sync_manager: SyncManager,
}

impl MetamergeApp {
    /// Wire the application together: subscribe the core event handlers
    /// and issue the one startup settings fetch.
    pub fn new(
        state: AppState,
        bridge: BackendBridge,
        mut sync_manager: SyncManager,
        dark_mode: bool,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        cc.egui_ctx.set_visuals(if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        cc.egui_ctx.set_zoom_factor(
            state.ui_font_size / crate::util::constants::DEFAULT_FONT_SIZE,
        );

        // Bus subscriptions decode raw payloads into typed events and hand
        // them to the update loop over a local channel. Unknown event names
        // simply have no subscriber.
        let mut bus = EventBus::new();
        let (typed_tx, typed_rx) = mpsc::channel();

        let tx = typed_tx.clone();
        bus.subscribe(EVENT_LOG, move |payload| {
            if let Some(event) = BackendEvent::decode(EVENT_LOG, payload) {
                let _ = tx.send(event);
            }
        });
        let tx = typed_tx;
        bus.subscribe(EVENT_EXIFTOOL_STATUS, move |payload| {
            if let Some(event) = BackendEvent::decode(EVENT_EXIFTOOL_STATUS, payload) {
                let _ = tx.send(event);
            }
        });

        sync_manager.start_fetch();

        Self {
            state,
            bridge,
            bus,
            typed_rx,
            sync_manager,
        }
    }
}

impl eframe::App for MetamergeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Backend events: transport → bus → typed → state ----
        let raw_events = self.bridge.drain(MAX_EVENTS_PER_FRAME);
        let had_events = !raw_events.is_empty();
        for (name, payload) in raw_events {
            self.bus.emit(&name, &payload);
        }
        while let Ok(event) = self.typed_rx.try_recv() {
            self.state.handle_backend_event(event);
        }

        // ---- Settings sync completions ----
        let sync_messages = self.sync_manager.poll_progress();
        let had_sync = !sync_messages.is_empty();
        for msg in sync_messages {
            self.state.handle_sync_progress(msg);
        }

        // ---- Pushes queued by the settings form ----
        for document in self.state.pending_pushes.drain(..) {
            self.sync_manager.push(document);
        }

        if had_events || had_sync {
            ctx.request_repaint();
        }

        // ---- Panels ----
        if !self.state.exiftool_ok {
            // ExifTool missing: the warning replaces the whole main view.
            ui::panels::warning::render(ctx);
        } else {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(&self.state.status_message);
                });
            });

            egui::TopBottomPanel::bottom("log_area")
                .resizable(false)
                .show(ctx, |ui| {
                    ui::panels::log_area::render(ui, &mut self.state);
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::panels::settings::render(ui, &mut self.state);
                });
            });
        }

        // Events and completions arrive from background threads; wake on a
        // fixed cadence so they appear without user input.
        ctx.request_repaint_after(std::time::Duration::from_millis(EVENT_POLL_INTERVAL_MS));
    }
}
