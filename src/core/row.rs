// LogDash - core/row.rs
//
// Log row rendering model: the per-row expand/collapse state and the pure
// function that turns a log record plus that state into a view description.
//
// The view is plain data. The UI layer paints it with egui; tests compare it
// directly. Rendering is deterministic: the same log, flag, and placement
// always give an equal `RowView`.

use crate::core::format::{format_metadata, format_timestamp};
use crate::core::model::{Level, LevelClass, Log};

// =============================================================================
// Row state
// =============================================================================

/// Expansion state owned by exactly one row.
///
/// Starts collapsed. Never shared between rows; each row holds its own value
/// and only that row's activation flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowState {
    expanded: bool,
}

impl RowState {
    /// A fresh, collapsed row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the metadata panel is currently shown.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip between collapsed and expanded. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Force the collapsed state.
    pub fn collapse(&mut self) {
        self.expanded = false;
    }
}

// =============================================================================
// Placement hint
// =============================================================================

/// Positioning and sizing hint supplied by a virtualised list.
///
/// The renderer does not interpret it; it is copied into the view as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    /// Offset of the row's top edge from the top of the list content.
    pub top: f32,
    /// Height reserved for the row.
    pub height: f32,
}

// =============================================================================
// View
// =============================================================================

/// Expansion indicator at the start of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chevron {
    Right,
    Down,
}

impl Chevron {
    /// Glyph for the indicator.
    pub fn glyph(&self) -> &'static str {
        match self {
            Chevron::Right => "\u{25b6}",
            Chevron::Down => "\u{25bc}",
        }
    }
}

/// Level badge: the raw label text and the class that decides its colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBadge {
    pub text: String,
    pub class: LevelClass,
}

/// Everything needed to paint one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub chevron: Chevron,
    /// Short formatted timestamp, or the raw input if it did not parse.
    pub timestamp: String,
    pub badge: LevelBadge,
    pub message: String,
    /// Indented metadata text. Always `None` when collapsed; also `None`
    /// when expanded but the log has no `metadata` key.
    pub metadata: Option<String>,
    pub placement: Option<RowPlacement>,
}

impl RowView {
    /// Whether the view was rendered in the expanded state.
    pub fn is_expanded(&self) -> bool {
        self.chevron == Chevron::Down
    }
}

/// Render one log row.
///
/// Metadata is serialised only when `expanded` is true, so collapsed rows in
/// a long list never pay for it.
pub fn render(log: &Log, expanded: bool, placement: Option<RowPlacement>) -> RowView {
    let metadata = if expanded {
        log.metadata.as_ref().map(format_metadata)
    } else {
        None
    };

    RowView {
        chevron: if expanded {
            Chevron::Down
        } else {
            Chevron::Right
        },
        timestamp: format_timestamp(&log.timestamp),
        badge: LevelBadge {
            text: log.level.clone(),
            class: Level::from_label(&log.level).presentation(),
        },
        message: log.message.clone(),
        metadata,
        placement,
    }
}

/// Render a row from its owned state.
pub fn render_row(log: &Log, state: &RowState, placement: Option<RowPlacement>) -> RowView {
    render(log, state.is_expanded(), placement)
}
