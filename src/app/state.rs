// LogDash - app/state.rs
//
// Application state management. Holds the loaded logs, one row state per
// log, the filter state, and status text.
// Owned by the eframe::App implementation.

use crate::core::export::ExportFormat;
use crate::core::filter::FilterState;
use crate::core::loader::{self, LoadConfig};
use crate::core::model::Log;
use crate::core::row::{RowPlacement, RowState};
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use std::path::{Path, PathBuf};

/// Placements for every filtered row, plus the inputs they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLayout {
    pub generation: u64,
    pub line_height: f32,
    pub metadata_max_height: f32,
    pub placements: Vec<RowPlacement>,
}

impl ListLayout {
    /// Whether this layout is still valid for the given inputs.
    pub fn matches(&self, generation: u64, line_height: f32, metadata_max_height: f32) -> bool {
        self.generation == generation
            && self.line_height == line_height
            && self.metadata_max_height == metadata_max_height
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Log records from the most recent load.
    pub logs: Vec<Log>,

    /// Expansion state for each row, parallel to `logs`.
    ///
    /// A row lives as long as its log stays loaded: filtering hides rows but
    /// keeps their state, while loading or clearing discards all of them.
    rows: Vec<RowState>,

    /// Indices of logs matching the current filter (into `logs`).
    pub filtered_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Regex text as typed, kept separately so an invalid pattern stays editable.
    pub regex_input: String,

    /// Error from the last regex compile, shown under the input.
    pub regex_error: Option<String>,

    /// File the current logs came from.
    pub source_path: Option<PathBuf>,

    /// File requested for loading (CLI or menu); consumed by the GUI loop.
    pub pending_load: Option<PathBuf>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config, load).
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Validated configuration.
    pub config: AppConfig,

    /// Dark (true) or light (false) visuals.
    pub dark_mode: bool,

    /// Last row layout built by the list panel.
    pub list_layout: Option<ListLayout>,

    /// Bumped whenever the filtered set or any row height may have changed.
    layout_generation: u64,
}

impl AppState {
    /// Create initial state from validated config.
    pub fn new(config: AppConfig) -> Self {
        Self {
            logs: Vec::new(),
            rows: Vec::new(),
            filtered_indices: Vec::new(),
            filter_state: FilterState::default(),
            regex_input: String::new(),
            regex_error: None,
            source_path: None,
            pending_load: None,
            status_message: "Ready. Open a log file to begin.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            dark_mode: config.dark_mode,
            config,
            list_layout: None,
            layout_generation: 0,
        }
    }

    /// Current layout generation; compare against `ListLayout::generation`.
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    fn invalidate_layout(&mut self) {
        self.layout_generation = self.layout_generation.wrapping_add(1);
    }

    /// Replace the loaded logs. Every row starts collapsed.
    pub fn set_logs(&mut self, logs: Vec<Log>) {
        self.rows = vec![RowState::new(); logs.len()];
        self.logs = logs;
        self.apply_filters();
    }

    /// Read, decode, and install a log file.
    ///
    /// On error the previously loaded logs are left untouched. Per-line
    /// decode failures are recorded as warnings. Returns the number of
    /// records loaded.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let content = fs::read_log_file(path)?;
        let load_config = LoadConfig {
            max_entries: self.config.max_entries,
        };
        let source_name = path.display().to_string();
        let result = loader::parse_logs(&content, &source_name, &load_config)?;

        self.warnings.clear();
        for err in &result.errors {
            self.push_warning(err.to_string());
        }
        if result.error_count > result.errors.len() {
            self.push_warning(format!(
                "{} further lines could not be decoded.",
                result.error_count - result.errors.len()
            ));
        }
        if result.dropped > 0 {
            self.push_warning(format!(
                "{} records dropped: the limit is {} entries ([loading] max_entries).",
                result.dropped, load_config.max_entries
            ));
        }

        let count = result.logs.len();
        self.set_logs(result.logs);
        self.source_path = Some(path.to_path_buf());
        self.status_message = if result.error_count > 0 {
            format!(
                "Loaded {count} entries ({} lines skipped).",
                result.error_count
            )
        } else {
            format!("Loaded {count} entries.")
        };
        Ok(count)
    }

    /// Record a warning, respecting `MAX_WARNINGS`.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            self.warnings.push(message);
        }
    }

    /// Recompute filtered indices from current logs and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices =
            crate::core::filter::apply_filters(&self.logs, &self.filter_state);
        self.invalidate_layout();
    }

    /// Compile `regex_input` into the filter and reapply.
    ///
    /// An invalid pattern leaves the previous regex active and records the
    /// error for display.
    pub fn update_regex(&mut self) {
        let pattern = self.regex_input.clone();
        match self.filter_state.set_regex(&pattern) {
            Ok(()) => {
                self.regex_error = None;
                self.apply_filters();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected filter regex");
                self.regex_error = Some(e.to_string());
            }
        }
    }

    /// Reset every filter and show all rows.
    pub fn clear_filters(&mut self) {
        self.filter_state = FilterState::default();
        self.regex_input.clear();
        self.regex_error = None;
        self.apply_filters();
    }

    /// State of the row for `logs[index]`.
    pub fn row(&self, index: usize) -> Option<&RowState> {
        self.rows.get(index)
    }

    /// Flip the row for `logs[index]`. Only that row changes.
    /// Returns the new expanded flag, or `None` for an unknown index.
    pub fn toggle_row(&mut self, index: usize) -> Option<bool> {
        let expanded = self.rows.get_mut(index)?.toggle();
        self.invalidate_layout();
        tracing::trace!(index, expanded, "Row toggled");
        Some(expanded)
    }

    /// Collapse every row.
    pub fn collapse_all(&mut self) {
        self.rows.iter_mut().for_each(RowState::collapse);
        self.invalidate_layout();
    }

    /// Number of rows currently expanded.
    pub fn expanded_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_expanded()).count()
    }

    /// Logs matching the current filter, in display order.
    pub fn filtered_logs(&self) -> Vec<&Log> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.logs.get(i))
            .collect()
    }

    /// Write the filtered logs to `dest`. Returns the number written.
    pub fn export_filtered(&self, dest: &Path, format: ExportFormat) -> Result<usize> {
        let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        let count = format.write(&self.filtered_logs(), file, dest)?;
        Ok(count)
    }

    /// Close the current file: drop all loaded logs and their row state.
    pub fn clear(&mut self) {
        self.logs.clear();
        self.rows.clear();
        self.filtered_indices.clear();
        self.source_path = None;
        self.warnings.clear();
        self.list_layout = None;
        self.invalidate_layout();
        self.status_message = "Ready. Open a log file to begin.".to_string();
        tracing::debug!("Log file closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use std::collections::HashSet;

    fn make_log(level: &str, message: &str) -> Log {
        Log {
            timestamp: "2024-01-15T10:30:00Z".to_string(),
            level: level.to_string(),
            message: message.to_string(),
            metadata: None,
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.set_logs(vec![
            make_log("INFO", "alpha"),
            make_log("ERROR", "beta"),
            make_log("WARN", "gamma"),
        ]);
        state
    }

    #[test]
    fn test_rows_start_collapsed() {
        let state = loaded_state();
        assert_eq!(state.expanded_count(), 0);
        assert_eq!(state.filtered_indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_toggle_affects_only_one_row() {
        let mut state = loaded_state();
        assert_eq!(state.toggle_row(1), Some(true));
        assert!(!state.row(0).unwrap().is_expanded());
        assert!(state.row(1).unwrap().is_expanded());
        assert!(!state.row(2).unwrap().is_expanded());
        assert_eq!(state.toggle_row(9), None);
    }

    #[test]
    fn test_filter_keeps_row_state() {
        let mut state = loaded_state();
        state.toggle_row(1);
        state.filter_state.levels = HashSet::from([Level::Info]);
        state.apply_filters();
        assert_eq!(state.filtered_indices, vec![0]);
        state.clear_filters();
        assert!(state.row(1).unwrap().is_expanded());
    }

    #[test]
    fn test_reload_discards_row_state() {
        let mut state = loaded_state();
        state.toggle_row(0);
        state.set_logs(vec![make_log("INFO", "fresh")]);
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_collapse_all() {
        let mut state = loaded_state();
        state.toggle_row(0);
        state.toggle_row(2);
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_clear_drops_rows_and_source() {
        let mut state = loaded_state();
        state.source_path = Some(PathBuf::from("app.ndjson"));
        state.toggle_row(1);
        state.clear();
        assert!(state.logs.is_empty());
        assert!(state.filtered_indices.is_empty());
        assert!(state.row(1).is_none());
        assert_eq!(state.expanded_count(), 0);
        assert!(state.source_path.is_none());

        // A fresh load after closing starts collapsed.
        state.set_logs(vec![make_log("INFO", "a"), make_log("WARN", "b")]);
        assert!(!state.row(1).unwrap().is_expanded());
    }

    #[test]
    fn test_layout_generation_tracks_row_changes() {
        let mut state = loaded_state();
        let start = state.layout_generation();

        state.toggle_row(0);
        let after_toggle = state.layout_generation();
        assert_ne!(after_toggle, start);

        assert_eq!(state.toggle_row(42), None);
        assert_eq!(state.layout_generation(), after_toggle);

        state.apply_filters();
        assert_ne!(state.layout_generation(), after_toggle);
    }

    #[test]
    fn test_list_layout_matches_inputs() {
        let layout = ListLayout {
            generation: 3,
            line_height: 14.0,
            metadata_max_height: 240.0,
            placements: Vec::new(),
        };
        assert!(layout.matches(3, 14.0, 240.0));
        assert!(!layout.matches(4, 14.0, 240.0));
        assert!(!layout.matches(3, 16.0, 240.0));
        assert!(!layout.matches(3, 14.0, 120.0));
    }

    #[test]
    fn test_export_filtered_writes_only_matches() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("errors.json");
        let mut state = loaded_state();
        state.filter_state = FilterState::errors_only();
        state.apply_filters();

        assert_eq!(state.export_filtered(&dest, ExportFormat::Json).unwrap(), 1);
        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.contains("beta"));
        assert!(!written.contains("alpha"));
    }

    #[test]
    fn test_export_to_missing_dir_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("no-such-dir").join("out.csv");
        let state = loaded_state();
        let result = state.export_filtered(&dest, ExportFormat::Csv);
        assert!(
            matches!(
                result,
                Err(crate::util::error::LogDashError::Export(ExportError::Io { .. }))
            ),
            "expected Export(Io), got {result:?}"
        );
    }

    #[test]
    fn test_invalid_regex_keeps_previous() {
        let mut state = loaded_state();
        state.regex_input = "^b".to_string();
        state.update_regex();
        assert_eq!(state.filtered_indices, vec![1]);

        state.regex_input = "(".to_string();
        state.update_regex();
        assert!(state.regex_error.is_some());
        assert_eq!(state.filtered_indices, vec![1]);
    }

    #[test]
    fn test_load_file_records_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ndjson");
        std::fs::write(
            &path,
            "{\"level\":\"INFO\",\"message\":\"ok\"}\n{broken\n",
        )
        .unwrap();

        let mut state = AppState::new(AppConfig::default());
        assert_eq!(state.load_file(&path).unwrap(), 1);
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.source_path.as_deref(), Some(path.as_path()));
        assert!(state.status_message.contains("1 lines skipped"));
    }

    #[test]
    fn test_failed_load_keeps_previous_logs() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state();
        assert!(state.load_file(&dir.path().join("missing.json")).is_err());
        assert_eq!(state.logs.len(), 3);
    }
}
