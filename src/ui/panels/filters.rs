// LogDash - ui/panels/filters.rs
//
// Filter controls sidebar.

use crate::app::state::AppState;
use crate::core::filter::FilterState;
use crate::core::model::{Level, LevelClass};
use crate::ui::theme;

/// Render the filter controls.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Quick filters
    ui.horizontal_wrapped(|ui| {
        if ui.button("Errors Only").clicked() {
            state.filter_state.levels = FilterState::errors_only().levels;
            state.apply_filters();
        }
        if ui.button("Errors + Warnings").clicked() {
            state.filter_state.levels = FilterState::errors_and_warnings().levels;
            state.apply_filters();
        }
        if ui.button("Clear Filters").clicked() {
            state.clear_filters();
        }
    });

    ui.separator();

    // Level checkboxes, coloured like the row badges.
    ui.label("Level:");
    let mut changed = false;
    for level in Level::all() {
        let mut checked = state.filter_state.levels.contains(level);
        let colour = theme::badge_colours(level.presentation(), state.dark_mode).text;
        let label = egui::RichText::new(level.label()).color(colour);
        if ui.checkbox(&mut checked, label).changed() {
            if checked {
                state.filter_state.levels.insert(*level);
            } else {
                state.filter_state.levels.remove(level);
            }
            changed = true;
        }
    }
    if changed {
        state.apply_filters();
    }

    ui.separator();

    // Text search
    ui.label("Message contains:");
    if ui
        .text_edit_singleline(&mut state.filter_state.text_search)
        .changed()
    {
        state.apply_filters();
    }

    ui.add_space(4.0);
    ui.label("Message regex:");
    if ui.text_edit_singleline(&mut state.regex_input).changed() {
        state.update_regex();
    }
    if let Some(ref err) = state.regex_error {
        let colour = theme::badge_colours(LevelClass::Error, state.dark_mode).text;
        ui.label(egui::RichText::new(err).size(11.0).color(colour));
    }

    // Load warnings
    if !state.warnings.is_empty() {
        ui.separator();
        egui::CollapsingHeader::new(format!("Warnings ({})", state.warnings.len()))
            .id_salt("load_warnings")
            .default_open(false)
            .show(ui, |ui| {
                for warning in &state.warnings {
                    ui.label(egui::RichText::new(warning).size(11.0));
                }
            });
    }
}
