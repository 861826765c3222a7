// LogDash - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use serde::{Deserialize, Serialize};

// =============================================================================
// Log record
// =============================================================================

/// A single log record as supplied by the log source.
///
/// Immutable from the row's point of view: rendering never rewrites a field.
/// Every field is kept exactly as received so that unparseable timestamps and
/// unrecognised levels can still be shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Log {
    /// Timestamp text, normally ISO 8601.
    #[serde(default)]
    pub timestamp: String,

    /// Level label, e.g. `INFO`, `WARN`, `ERROR`, or anything else.
    #[serde(default)]
    pub level: String,

    /// Single-line summary text.
    #[serde(default)]
    pub message: String,

    /// Arbitrary structured side-data. `None` only when the key is missing;
    /// an explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<serde_json::Value>,
}

/// Wrap any value that is present in the input, `null` included.
/// Missing keys never reach this function; `#[serde(default)]` covers them.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl Log {
    /// Classified level of this record.
    pub fn level_kind(&self) -> Level {
        Level::from_label(&self.level)
    }
}

// =============================================================================
// Level
// =============================================================================

/// Known severity levels plus a catch-all for any other label.
///
/// Matching is exact and case-sensitive: `info` is `Other`, not `Info`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Level {
    Error,
    Warn,
    Info,
    #[default]
    Other,
}

impl Level {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [Level] {
        &[Level::Error, Level::Warn, Level::Info, Level::Other]
    }

    /// Classify a raw level label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            _ => Level::Other,
        }
    }

    /// Parse a user-supplied level name (CLI), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "other" => Some(Level::Other),
            _ => None,
        }
    }

    /// Human-readable label for filter controls.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Other => "Other",
        }
    }

    /// How a badge for this level is presented.
    pub fn presentation(&self) -> LevelClass {
        match self {
            Level::Info => LevelClass::Informational,
            Level::Warn => LevelClass::Warning,
            Level::Error => LevelClass::Error,
            Level::Other => LevelClass::Neutral,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation class for a level badge. The UI layer maps each class to
/// concrete colours; the core only decides which class applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelClass {
    Informational,
    Warning,
    Error,
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_classify_exactly() {
        assert_eq!(Level::from_label("INFO"), Level::Info);
        assert_eq!(Level::from_label("WARN"), Level::Warn);
        assert_eq!(Level::from_label("ERROR"), Level::Error);
    }

    #[test]
    fn test_other_labels_are_other() {
        for label in ["DEBUG", "info", "Error", "WARNING", "", " INFO"] {
            assert_eq!(Level::from_label(label), Level::Other, "label {label:?}");
        }
    }

    #[test]
    fn test_presentation_mapping() {
        assert_eq!(Level::Info.presentation(), LevelClass::Informational);
        assert_eq!(Level::Warn.presentation(), LevelClass::Warning);
        assert_eq!(Level::Error.presentation(), LevelClass::Error);
        assert_eq!(Level::Other.presentation(), LevelClass::Neutral);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Level::from_name("Warning"), Some(Level::Warn));
        assert_eq!(Level::from_name(" error "), Some(Level::Error));
        assert_eq!(Level::from_name("fatal"), None);
    }

    #[test]
    fn test_deserialize_missing_and_null_metadata() {
        let log: Log =
            serde_json::from_str(r#"{"timestamp":"t","level":"INFO","message":"m"}"#).unwrap();
        assert!(log.metadata.is_none());

        let log: Log = serde_json::from_str(
            r#"{"timestamp":"t","level":"INFO","message":"m","metadata":null}"#,
        )
        .unwrap();
        assert_eq!(log.metadata, Some(serde_json::Value::Null));
    }

    #[test]
    fn test_null_metadata_survives_serialisation() {
        let log: Log = serde_json::from_str(r#"{"message":"m","metadata":null}"#).unwrap();
        let text = serde_json::to_string(&log).unwrap();
        assert!(text.contains("\"metadata\":null"), "{text}");

        let bare: Log = serde_json::from_str(r#"{"message":"m"}"#).unwrap();
        assert!(!serde_json::to_string(&bare).unwrap().contains("metadata"));
    }

    #[test]
    fn test_deserialize_missing_fields_default_empty() {
        let log: Log = serde_json::from_str(r#"{"message":"only message"}"#).unwrap();
        assert_eq!(log.timestamp, "");
        assert_eq!(log.level, "");
        assert_eq!(log.level_kind(), Level::Other);
    }
}
