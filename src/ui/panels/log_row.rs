// LogDash - ui/panels/log_row.rs
//
// Paints one `RowView` as a card: a clickable summary line (chevron,
// timestamp, level badge, message) and, for expanded rows with metadata,
// a captioned scrollable monospace panel.
//
// The painter holds no state. It reports activation and the caller flips
// the row's own `RowState`.

use crate::core::row::{LevelBadge, RowView};
use crate::ui::theme;
use crate::util::constants::METADATA_CAPTION;
use egui::{CursorIcon, Margin, RichText, Sense, Stroke};
use std::hash::Hash;

/// Per-frame presentation inputs that are not part of the view itself.
#[derive(Debug, Clone, Copy)]
pub struct RowStyle {
    pub dark_mode: bool,
    pub hovered: bool,
    pub metadata_max_height: f32,
}

/// Paint a row. Returns true when the summary line was activated (clicked,
/// or Enter/Space while focused).
pub fn show(ui: &mut egui::Ui, view: &RowView, id_salt: impl Hash, style: &RowStyle) -> bool {
    let mut activated = false;

    egui::Frame::new()
        .fill(theme::row_fill(style.dark_mode, style.hovered))
        .stroke(Stroke::new(1.0, theme::row_border(style.dark_mode)))
        .corner_radius(6.0)
        .inner_margin(Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            let header = ui
                .horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    ui.label(RichText::new(view.chevron.glyph()).size(10.0).weak());
                    ui.add_sized(
                        [theme::TIMESTAMP_WIDTH, ui.spacing().interact_size.y],
                        egui::Label::new(
                            RichText::new(&view.timestamp).monospace().size(11.5).weak(),
                        )
                        .truncate(),
                    );
                    badge(ui, &view.badge, style.dark_mode);
                    ui.add(egui::Label::new(&view.message).truncate());
                })
                .response
                .interact(Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand);

            if header.clicked() {
                activated = true;
            }

            if let Some(ref text) = view.metadata {
                metadata_panel(ui, text, id_salt, style);
            }
        });

    activated
}

/// Outlined level badge coloured by its presentation class.
fn badge(ui: &mut egui::Ui, badge: &LevelBadge, dark_mode: bool) {
    let colours = theme::badge_colours(badge.class, dark_mode);
    egui::Frame::new()
        .fill(colours.fill)
        .stroke(Stroke::new(1.0, colours.stroke))
        .corner_radius(8.0)
        .inner_margin(Margin::symmetric(7, 1))
        .show(ui, |ui| {
            ui.label(
                RichText::new(&badge.text)
                    .size(11.0)
                    .strong()
                    .color(colours.text),
            );
        });
}

/// Divider, caption, and scrollable monospace metadata text.
fn metadata_panel(ui: &mut egui::Ui, text: &str, id_salt: impl Hash, style: &RowStyle) {
    ui.add_space(4.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 1.0), Sense::hover());
    ui.painter()
        .rect_filled(rect, 0.0, theme::row_border(style.dark_mode));
    ui.add_space(4.0);

    ui.label(RichText::new(METADATA_CAPTION).size(11.0).weak());

    egui::Frame::new()
        .fill(theme::metadata_fill(style.dark_mode))
        .stroke(Stroke::new(1.0, theme::row_border(style.dark_mode)))
        .corner_radius(4.0)
        .inner_margin(Margin::same(6))
        .show(ui, |ui| {
            egui::ScrollArea::both()
                .id_salt(("row_metadata", id_salt))
                .max_height(style.metadata_max_height)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(RichText::new(text).font(theme::metadata_font()))
                            .extend(),
                    );
                });
        });
}
