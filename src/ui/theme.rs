// LogDash - ui/theme.rs
//
// Colour scheme, level-class colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::LevelClass;
use egui::{Color32, FontId};

/// Colours for one level badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeColours {
    pub fill: Color32,
    pub stroke: Color32,
    pub text: Color32,
}

/// Base hue for a presentation class.
fn class_hue(class: LevelClass, dark_mode: bool) -> Color32 {
    match (class, dark_mode) {
        (LevelClass::Informational, true) => Color32::from_rgb(96, 165, 250), // Blue 400
        (LevelClass::Informational, false) => Color32::from_rgb(37, 99, 235), // Blue 600
        (LevelClass::Warning, true) => Color32::from_rgb(251, 191, 36),       // Amber 400
        (LevelClass::Warning, false) => Color32::from_rgb(217, 119, 6),       // Amber 600
        (LevelClass::Error, true) => Color32::from_rgb(248, 113, 113),        // Red 400
        (LevelClass::Error, false) => Color32::from_rgb(220, 38, 38),         // Red 600
        (LevelClass::Neutral, true) => Color32::from_rgb(156, 163, 175),      // Gray 400
        (LevelClass::Neutral, false) => Color32::from_rgb(107, 114, 128),     // Gray 500
    }
}

/// Badge colours: the hue at 20% for the fill, 30% for the outline, and
/// full strength for the label.
pub fn badge_colours(class: LevelClass, dark_mode: bool) -> BadgeColours {
    let hue = class_hue(class, dark_mode);
    let [r, g, b, _] = hue.to_array();
    BadgeColours {
        fill: Color32::from_rgba_unmultiplied(r, g, b, 51),
        stroke: Color32::from_rgba_unmultiplied(r, g, b, 77),
        text: hue,
    }
}

/// Card background for a row.
pub fn row_fill(dark_mode: bool, hovered: bool) -> Color32 {
    match (dark_mode, hovered) {
        (true, false) => Color32::from_rgb(24, 28, 36),
        (true, true) => Color32::from_rgb(33, 39, 50),
        (false, false) => Color32::from_rgb(255, 255, 255),
        (false, true) => Color32::from_rgb(243, 244, 246),
    }
}

/// Card outline and metadata divider.
pub fn row_border(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_unmultiplied(75, 85, 99, 128)
    } else {
        Color32::from_rgba_unmultiplied(209, 213, 219, 128)
    }
}

/// Background of the metadata panel.
pub fn metadata_fill(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_unmultiplied(55, 65, 81, 128)
    } else {
        Color32::from_rgba_unmultiplied(229, 231, 235, 128)
    }
}

/// Font for metadata text.
pub fn metadata_font() -> FontId {
    FontId::monospace(METADATA_FONT_SIZE)
}

/// Default width of the filter sidebar.
pub const SIDEBAR_WIDTH: f32 = 240.0;
/// Height of a collapsed row card, excluding spacing.
pub const ROW_HEIGHT: f32 = 34.0;
/// Vertical gap between row cards.
pub const ROW_SPACING: f32 = 4.0;
/// Width reserved for the timestamp column.
pub const TIMESTAMP_WIDTH: f32 = 118.0;
/// Height of everything in an expanded row besides the metadata lines:
/// divider, caption, panel padding, and horizontal scrollbar.
pub const METADATA_CHROME_HEIGHT: f32 = 48.0;
/// Point size of the monospace metadata text.
pub const METADATA_FONT_SIZE: f32 = 11.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_class_has_distinct_hue() {
        for dark in [true, false] {
            let hues: Vec<_> = [
                LevelClass::Informational,
                LevelClass::Warning,
                LevelClass::Error,
                LevelClass::Neutral,
            ]
            .iter()
            .map(|c| badge_colours(*c, dark).text)
            .collect();
            for (i, a) in hues.iter().enumerate() {
                for b in &hues[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
