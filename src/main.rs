// LogDash - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use logdash::app;
pub use logdash::core;
pub use logdash::platform;
pub use logdash::ui;
pub use logdash::util;

use clap::Parser;
use std::path::PathBuf;

/// LogDash - log-monitoring dashboard.
///
/// Open a JSON or newline-delimited JSON log file and browse its entries.
/// Click a row to expand its metadata.
#[derive(Parser, Debug)]
#[command(name = "LogDash", version, about)]
struct Cli {
    /// Log file to open (.json array or .ndjson/.jsonl lines).
    path: Option<PathBuf>,

    /// Initial level filter, comma-separated: info, warn, error, other.
    #[arg(short = 'f', long = "filter-level")]
    filter_level: Option<String>,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config comes first: it carries the log level and log file.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "LogDash starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let initial_filter = match cli.filter_level.as_deref() {
        Some(names) => match core::filter::FilterState::with_level_names(names) {
            Ok(filter) => Some(filter),
            Err(e) => {
                tracing::error!(error = %e, "Invalid --filter-level");
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        },
        None => None,
    };

    let mut state = app::state::AppState::new(config);
    for warning in config_warnings {
        state.push_warning(warning);
    }
    if let Some(filter) = initial_filter {
        state.filter_state = filter;
    }
    // Loaded on the first frame so failures show in the status bar.
    state.pending_load = cli.path;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(gui::LogDashApp::new(&cc.egui_ctx, state)))),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogDash GUI: {e}");
        std::process::exit(1);
    }
}
