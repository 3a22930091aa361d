// metamerge - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Platform path and config.toml loading
// 4. Settings service + backend event transport wiring
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use metamerge::app;
pub use metamerge::core;
pub use metamerge::platform;
pub use metamerge::ui;
pub use metamerge::util;

use app::bridge::{BackendBridge, BackendEmitter};
use app::store::JsonSettingsStore;
use app::sync::SyncManager;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// metamerge - merge Google Photos Takeout metadata into your media files.
///
/// Renders the merge backend's log stream and keeps the merge settings in
/// sync with the settings service.
#[derive(Parser, Debug)]
#[command(name = "metamerge", version, about)]
struct Cli {
    /// Settings document path (overrides the platform config directory).
    #[arg(short = 's', long = "settings-file")]
    settings_file: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Check for the external ExifTool binary on a background thread and
/// report the result over the event transport, exactly as the merge
/// backend reports its own progress.
fn spawn_exiftool_probe(emitter: BackendEmitter) {
    std::thread::spawn(move || {
        let available = platform::exiftool::exiftool_available();
        if available {
            emitter.emit_log("info", "ExifTool found");
        } else {
            emitter.emit_log("error", "ExifTool not found on PATH");
        }
        emitter.emit_exiftool_status(available);
    });
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config.toml before logging so the
    // configured level can apply; warnings are logged right after init.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "metamerge starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // Settings service: CLI override > platform config directory.
    let settings_path = cli
        .settings_file
        .unwrap_or_else(|| platform_paths.settings_file());
    tracing::debug!(path = %settings_path.display(), "Settings document path");
    let sync_manager = SyncManager::new(Arc::new(JsonSettingsStore::new(settings_path)));

    // Backend event transport. The probe is the first emitter; the merge
    // engine attaches its own clone of the emitter when it starts.
    let (emitter, bridge) = BackendBridge::channel();
    spawn_exiftool_probe(emitter.clone());
    emitter.emit_log("info", "Ready. Drop a Takeout folder to start merging.");

    let state = app::state::AppState::new(config.font_size);
    let dark_mode = config.dark_mode;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(gui::MetamergeApp::new(
                state,
                bridge,
                sync_manager,
                dark_mode,
                cc,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch metamerge GUI: {e}");
        std::process::exit(1);
    }
}
