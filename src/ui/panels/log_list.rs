// LogDash - ui/panels/log_list.rs
//
// Virtual-scrolling list of log rows (central area).
//
// Rows have variable height (expanded rows carry a metadata panel), so
// `ScrollArea::show_rows` cannot be used. Instead a layout pass computes a
// `RowPlacement` for every filtered row, and `show_viewport` paints only the
// rows whose placement intersects the visible region. Each placement is fed
// through the row renderer unmodified and used to position the card.
//
// The layout is cached in `AppState` and rebuilt only when a load, filter,
// or toggle bumps the layout generation, or the font or height limit changes.

use crate::app::state::{AppState, ListLayout};
use crate::core::format::format_metadata;
use crate::core::model::Log;
use crate::core::row::{self, RowPlacement, RowState};
use crate::ui::panels::log_row::{self, RowStyle};
use crate::ui::theme;

/// Height reserved for one row, including the gap below it.
///
/// `metadata_lines` is the line count of the serialised metadata (0 when the
/// row is collapsed or has none).
pub fn row_height(metadata_lines: usize, line_height: f32, metadata_max_height: f32) -> f32 {
    let mut height = theme::ROW_HEIGHT + theme::ROW_SPACING;
    if metadata_lines > 0 {
        let text = (metadata_lines as f32 * line_height).min(metadata_max_height);
        height += theme::METADATA_CHROME_HEIGHT + text;
    }
    height
}

/// Lines of metadata an expanded row will show.
fn metadata_lines(log: &Log) -> usize {
    log.metadata
        .as_ref()
        .map(|m| format_metadata(m).lines().count())
        .unwrap_or(0)
}

/// Stack rows top to bottom. `heights[i]` is the reserved height of row `i`.
pub fn layout_rows(heights: impl IntoIterator<Item = f32>) -> Vec<RowPlacement> {
    let mut top = 0.0;
    heights
        .into_iter()
        .map(|height| {
            let placement = RowPlacement { top, height };
            top += height;
            placement
        })
        .collect()
}

/// Build placements for the current filtered rows.
pub fn build_layout(state: &AppState, line_height: f32, metadata_max_height: f32) -> ListLayout {
    let placements = layout_rows(state.filtered_indices.iter().map(|&idx| {
        let expanded = state.row(idx).is_some_and(RowState::is_expanded);
        let lines = match state.logs.get(idx) {
            Some(log) if expanded => metadata_lines(log),
            _ => 0,
        };
        row_height(lines, line_height, metadata_max_height)
    }));
    tracing::trace!(rows = placements.len(), "Row layout rebuilt");
    ListLayout {
        generation: state.layout_generation(),
        line_height,
        metadata_max_height,
        placements,
    }
}

/// Make sure `state.list_layout` is valid for the given inputs.
pub fn refresh_layout(state: &mut AppState, line_height: f32, metadata_max_height: f32) {
    let generation = state.layout_generation();
    let fresh = state
        .list_layout
        .as_ref()
        .is_some_and(|l| l.matches(generation, line_height, metadata_max_height));
    if !fresh {
        state.list_layout = Some(build_layout(state, line_height, metadata_max_height));
    }
}

/// Index of the first placement whose bottom edge is below `y`.
pub fn first_visible(placements: &[RowPlacement], y: f32) -> usize {
    placements.partition_point(|p| p.top + p.height <= y)
}

/// Render the log list panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let shown = state.filtered_indices.len();

    if shown == 0 {
        ui.centered_and_justified(|ui| {
            if state.logs.is_empty() {
                ui.label("No logs loaded.\nOpen a log file via File \u{2192} Open\u{2026}");
            } else {
                ui.label("No entries match the current filters.");
            }
        });
        return;
    }

    let style = RowStyle {
        dark_mode: state.dark_mode,
        hovered: false,
        metadata_max_height: state.config.metadata_max_height,
    };
    let line_height = ui.fonts(|f| f.row_height(&theme::metadata_font()));

    refresh_layout(state, line_height, style.metadata_max_height);
    let placements: &[RowPlacement] = state
        .list_layout
        .as_ref()
        .map(|l| l.placements.as_slice())
        .unwrap_or_default();
    let total_height = placements.last().map_or(0.0, |p| p.top + p.height);

    // Toggles are applied after the scroll area releases its borrow of `state`.
    let mut toggled: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("log_list")
        .auto_shrink([false; 2])
        .show_viewport(ui, |ui, viewport| {
            ui.set_height(total_height);
            let origin = ui.max_rect().min;
            let width = ui.available_width();

            for display_idx in first_visible(placements, viewport.min.y)..shown {
                let Some(&placement) = placements.get(display_idx) else {
                    break;
                };
                if placement.top > viewport.max.y {
                    break;
                }
                let Some(&log_idx) = state.filtered_indices.get(display_idx) else {
                    continue;
                };
                let (Some(log), Some(row_state)) = (state.logs.get(log_idx), state.row(log_idx))
                else {
                    continue;
                };

                let view = row::render_row(log, row_state, Some(placement));
                let Some(hint) = view.placement else {
                    continue;
                };
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, hint.top),
                    egui::vec2(width, hint.height - theme::ROW_SPACING),
                );
                let row_style = RowStyle {
                    hovered: ui.rect_contains_pointer(rect),
                    ..style
                };

                let activated = ui
                    .scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
                        ui.set_clip_rect(rect.intersect(ui.clip_rect()));
                        log_row::show(ui, &view, log_idx, &row_style)
                    })
                    .inner;
                if activated {
                    toggled = Some(log_idx);
                }
            }
        });

    if let Some(idx) = toggled {
        state.toggle_row(idx);
        ui.ctx().request_repaint();
    }
}
