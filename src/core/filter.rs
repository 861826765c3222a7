// LogDash - core/filter.rs
//
// Composable filter engine for log records.
// All active filters are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{Level, Log};
use crate::util::error::FilterError;
use regex::Regex;
use std::collections::HashSet;

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Levels to include (empty = all).
    pub levels: HashSet<Level>,

    /// Substring text search over the message (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Compiled regex search over the message. None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty() && self.text_search.is_empty() && self.regex_search.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// Returns an error if the pattern is invalid; the previous regex is kept.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Build a level filter from a comma-separated list of names
    /// (`info`, `warn`, `error`, `other`).
    pub fn with_level_names(names: &str) -> Result<Self, FilterError> {
        let mut levels = HashSet::new();
        for name in names.split(',').filter(|n| !n.trim().is_empty()) {
            let level = Level::from_name(name).ok_or_else(|| FilterError::UnknownLevel {
                name: name.trim().to_string(),
            })?;
            levels.insert(level);
        }
        Ok(Self {
            levels,
            ..Default::default()
        })
    }

    /// Create a quick-filter for errors only.
    pub fn errors_only() -> Self {
        Self {
            levels: HashSet::from([Level::Error]),
            ..Default::default()
        }
    }

    /// Create a quick-filter for errors and warnings.
    pub fn errors_and_warnings() -> Self {
        Self {
            levels: HashSet::from([Level::Error, Level::Warn]),
            ..Default::default()
        }
    }
}

/// Apply filters to a slice of logs, returning indices of matching records.
///
/// Indices point into the original slice so that rows keep their identity
/// (and their expansion state) while the filter changes.
pub fn apply_filters(logs: &[Log], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..logs.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    logs.iter()
        .enumerate()
        .filter(|(_, log)| matches_all(log, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single record matches all active filters.
fn matches_all(log: &Log, filter: &FilterState, text_lower: &str) -> bool {
    if !filter.levels.is_empty() && !filter.levels.contains(&log.level_kind()) {
        return false;
    }

    if !text_lower.is_empty() && !log.message.to_lowercase().contains(text_lower) {
        return false;
    }

    if let Some(ref regex) = filter.regex_search {
        if !regex.is_match(&log.message) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_log(level: &str, message: &str) -> Log {
        Log {
            timestamp: "2024-01-15T10:30:00Z".to_string(),
            level: level.to_string(),
            message: message.to_string(),
            metadata: None,
        }
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let logs = vec![make_log("ERROR", "Error 1"), make_log("INFO", "Info 1")];
        let result = apply_filters(&logs, &FilterState::default());
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn test_level_filter() {
        let logs = vec![
            make_log("ERROR", "Error 1"),
            make_log("INFO", "Info 1"),
            make_log("WARN", "Warning 1"),
        ];
        assert_eq!(apply_filters(&logs, &FilterState::errors_only()), vec![0]);
        assert_eq!(
            apply_filters(&logs, &FilterState::errors_and_warnings()),
            vec![0, 2]
        );
    }

    #[test]
    fn test_other_level_filter_catches_unknown_labels() {
        let logs = vec![
            make_log("DEBUG", "d"),
            make_log("INFO", "i"),
            make_log("error", "lowercase"),
        ];
        let filter = FilterState::with_level_names("other").unwrap();
        assert_eq!(apply_filters(&logs, &filter), vec![0, 2]);
    }

    #[test]
    fn test_text_search_case_insensitive() {
        let logs = vec![
            make_log("ERROR", "Connection FAILED"),
            make_log("INFO", "Connection succeeded"),
        ];
        let filter = FilterState {
            text_search: "failed".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&logs, &filter), vec![0]);
    }

    #[test]
    fn test_regex_filter() {
        let logs = vec![
            make_log("ERROR", "Error code: 404"),
            make_log("ERROR", "Error code: 500"),
            make_log("INFO", "Status OK"),
        ];
        let mut filter = FilterState::default();
        filter.set_regex(r"code:\s*5\d{2}").unwrap();
        assert_eq!(apply_filters(&logs, &filter), vec![1]);
    }

    #[test]
    fn test_combined_filters() {
        let logs = vec![
            make_log("ERROR", "Database connection failed"),
            make_log("ERROR", "Network timeout"),
            make_log("INFO", "Database query ok"),
        ];
        let filter = FilterState {
            levels: HashSet::from([Level::Error]),
            text_search: "database".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&logs, &filter), vec![0]);
    }

    #[test]
    fn test_invalid_regex() {
        let mut filter = FilterState::default();
        assert!(filter.set_regex("[invalid").is_err());
        assert!(filter.regex_search.is_none());
    }

    #[test]
    fn test_level_names_parsing() {
        let filter = FilterState::with_level_names("error, warn").unwrap();
        assert_eq!(filter.levels, HashSet::from([Level::Error, Level::Warn]));

        let err = FilterState::with_level_names("error,fatal").unwrap_err();
        assert!(matches!(err, FilterError::UnknownLevel { ref name } if name == "fatal"));
    }
}
