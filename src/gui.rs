// LogDash - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and handles load/export requests.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::ui;
use crate::util::constants;

/// The LogDash application.
pub struct LogDashApp {
    pub state: AppState,
}

impl LogDashApp {
    /// Create a new application instance with the given state.
    pub fn new(ctx: &egui::Context, state: AppState) -> Self {
        apply_style(ctx, &state);
        Self { state }
    }

    /// Load the file queued in `pending_load`, if any.
    fn process_pending_load(&mut self) {
        let Some(path) = self.state.pending_load.take() else {
            return;
        };
        match self.state.load_file(&path) {
            Ok(count) => {
                tracing::info!(path = %path.display(), entries = count, "Log file loaded");
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load log file");
                self.state.status_message = format!("Failed to load: {e}");
            }
        }
    }

    /// Ask for a destination and write the filtered logs there.
    fn export(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("logs.{}", format.extension()))
            .save_file()
        else {
            return;
        };
        self.state.status_message = match self.state.export_filtered(&dest, format) {
            Ok(n) => format!("Exported {n} entries to {}.", format.label()),
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                format!("{} export failed: {e}", format.label())
            }
        };
    }
}

/// Apply theme and font size from state.
fn apply_style(ctx: &egui::Context, state: &AppState) {
    ctx.set_visuals(if state.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    let font_size = state.config.font_size;
    ctx.style_mut(|style| {
        if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            body.size = font_size;
        }
        if let Some(button) = style.text_styles.get_mut(&egui::TextStyle::Button) {
            button.size = font_size;
        }
    });
}

impl eframe::App for LogDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_load();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Log files", constants::LOG_FILE_EXTENSIONS)
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            self.state.pending_load = Some(path);
                        }
                        ui.close_menu();
                    }
                    let has_file = self.state.source_path.is_some();
                    if ui
                        .add_enabled(has_file, egui::Button::new("Reload"))
                        .clicked()
                    {
                        self.state.pending_load = self.state.source_path.clone();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_file, egui::Button::new("Close"))
                        .clicked()
                    {
                        self.state.clear();
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export sub-menu -- enabled only when there are filtered entries
                    let has_entries = !self.state.filtered_indices.is_empty();
                    ui.add_enabled_ui(has_entries, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in [ExportFormat::Csv, ExportFormat::Json] {
                                if ui
                                    .button(format!("Export {}\u{2026}", format.label()))
                                    .clicked()
                                {
                                    self.export(format);
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.state.dark_mode, "Dark mode").changed() {
                        apply_style(ctx, &self.state);
                    }
                    let any_expanded = self.state.expanded_count() > 0;
                    if ui
                        .add_enabled(any_expanded, egui::Button::new("Collapse All"))
                        .clicked()
                    {
                        self.state.collapse_all();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                if let Some(ref path) = self.state.source_path {
                    ui.separator();
                    ui.label(egui::RichText::new(path.display().to_string()).weak());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.logs.len();
                    let shown = self.state.filtered_indices.len();
                    if total > 0 {
                        ui.label(format!("{shown}/{total} entries"));
                        let expanded = self.state.expanded_count();
                        if expanded > 0 {
                            ui.separator();
                            ui.label(format!("{expanded} expanded"));
                        }
                    }
                });
            });
        });

        // Left sidebar
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_filters")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::filters::render(ui, &mut self.state);
                    });
            });

        // Central panel (log rows)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::log_list::render(ui, &mut self.state);
        });

        ui::panels::about::render(ctx, &mut self.state);
    }
}
