// LogDash - core/loader.rs
//
// Decodes log records from text. Two layouts are accepted:
//   - a JSON array of log objects (the whole document must decode), and
//   - newline-delimited JSON, one object per line (bad lines are skipped).
//
// Core layer: operates on in-memory content only; reading files is the
// platform layer's job.

use crate::core::model::Log;
use crate::util::constants;
use crate::util::error::LoadError;
use rayon::prelude::*;

/// Tunables for decoding.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Maximum records kept; further records are dropped and counted.
    pub max_entries: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_entries: constants::DEFAULT_MAX_TOTAL_ENTRIES,
        }
    }
}

/// Detected document layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLayout {
    JsonArray,
    JsonLines,
}

/// Outcome of decoding one document.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Decoded records, in input order.
    pub logs: Vec<Log>,

    /// Non-fatal per-line errors (at most `MAX_LOAD_WARNINGS` are kept).
    pub errors: Vec<LoadError>,

    /// Total number of lines that failed to decode, including unstored ones.
    pub error_count: usize,

    /// Records dropped because `max_entries` was reached.
    pub dropped: usize,
}

/// Guess the layout from the first non-whitespace character.
pub fn detect_layout(content: &str) -> LogLayout {
    match content.trim_start_matches('\u{feff}').trim_start().chars().next() {
        Some('[') => LogLayout::JsonArray,
        _ => LogLayout::JsonLines,
    }
}

/// Decode log records from `content`.
///
/// `source_name` is used only in error messages. A malformed JSON array is
/// fatal; malformed JSON lines are recorded in `LoadResult::errors` and
/// skipped.
pub fn parse_logs(
    content: &str,
    source_name: &str,
    config: &LoadConfig,
) -> Result<LoadResult, LoadError> {
    let content = content.trim_start_matches('\u{feff}');
    let layout = detect_layout(content);
    tracing::debug!(source = source_name, ?layout, bytes = content.len(), "Decoding logs");

    let mut result = match layout {
        LogLayout::JsonArray => {
            let logs: Vec<Log> =
                serde_json::from_str(content).map_err(|e| LoadError::Json {
                    source_name: source_name.to_string(),
                    source: e,
                })?;
            LoadResult {
                logs,
                ..Default::default()
            }
        }
        LogLayout::JsonLines => parse_json_lines(content, source_name),
    };

    if result.logs.len() > config.max_entries {
        result.dropped = result.logs.len() - config.max_entries;
        result.logs.truncate(config.max_entries);
        tracing::warn!(
            source = source_name,
            kept = config.max_entries,
            dropped = result.dropped,
            "Entry cap reached; excess records dropped"
        );
    }

    tracing::info!(
        source = source_name,
        entries = result.logs.len(),
        errors = result.error_count,
        "Logs decoded"
    );
    Ok(result)
}

/// Decode newline-delimited JSON. Lines are decoded in parallel; output
/// keeps the input order.
fn parse_json_lines(content: &str, source_name: &str) -> LoadResult {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
        .collect();

    let decoded: Vec<Result<Log, (usize, &str, serde_json::Error)>> = lines
        .par_iter()
        .map(|&(line_number, line)| {
            serde_json::from_str::<Log>(line).map_err(|e| (line_number, line, e))
        })
        .collect();

    let mut result = LoadResult {
        logs: Vec::with_capacity(decoded.len()),
        ..Default::default()
    };

    for item in decoded {
        match item {
            Ok(log) => result.logs.push(log),
            Err((line_number, line, source)) => {
                result.error_count += 1;
                if result.errors.len() < constants::MAX_LOAD_WARNINGS {
                    tracing::debug!(file = source_name, line_number, error = %source, "Skipping line");
                    result.errors.push(LoadError::Line {
                        source_name: source_name.to_string(),
                        line_number,
                        preview: preview(line),
                        source,
                    });
                }
            }
        }
    }

    result
}

/// First `MAX_LINE_PREVIEW` characters of a line, with an ellipsis if cut.
fn preview(line: &str) -> String {
    let mut chars = line.chars();
    let head: String = chars.by_ref().take(constants::MAX_LINE_PREVIEW).collect();
    if chars.next().is_some() {
        format!("{head}\u{2026}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_layout() {
        assert_eq!(detect_layout("  \n[{}]"), LogLayout::JsonArray);
        assert_eq!(detect_layout("\u{feff}[]"), LogLayout::JsonArray);
        assert_eq!(detect_layout("{\"message\":\"x\"}"), LogLayout::JsonLines);
        assert_eq!(detect_layout(""), LogLayout::JsonLines);
    }

    #[test]
    fn test_parse_json_array() {
        let content = r#"[
            {"timestamp":"2024-01-15T10:30:00Z","level":"ERROR","message":"disk full","metadata":{"disk":"/dev/sda1"}},
            {"timestamp":"2024-01-15T10:31:00Z","level":"INFO","message":"recovered"}
        ]"#;
        let result = parse_logs(content, "test.json", &LoadConfig::default()).unwrap();
        assert_eq!(result.logs.len(), 2);
        assert_eq!(result.logs[0].message, "disk full");
        assert!(result.logs[0].metadata.is_some());
        assert!(result.logs[1].metadata.is_none());
        assert_eq!(result.error_count, 0);
    }

    #[test]
    fn test_malformed_array_is_fatal() {
        let result = parse_logs("[{\"message\": ", "bad.json", &LoadConfig::default());
        assert!(matches!(result, Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_json_lines_skip_bad_lines_and_keep_order() {
        let content = "{\"level\":\"INFO\",\"message\":\"one\"}\n\
                       \n\
                       not json\n\
                       {\"level\":\"WARN\",\"message\":\"two\"}\n\
                       {\"level\":\"ERROR\",\"message\":\"three\"}\n";
        let result = parse_logs(content, "app.ndjson", &LoadConfig::default()).unwrap();
        let messages: Vec<_> = result.logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two", "three"]);
        assert_eq!(result.error_count, 1);
        match &result.errors[0] {
            LoadError::Line {
                line_number,
                preview,
                ..
            } => {
                assert_eq!(*line_number, 3);
                assert_eq!(preview, "not json");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_entry_cap_drops_excess() {
        let content: String = (0..10)
            .map(|i| format!("{{\"message\":\"m{i}\"}}\n"))
            .collect();
        let config = LoadConfig { max_entries: 4 };
        let result = parse_logs(&content, "many.ndjson", &config).unwrap();
        assert_eq!(result.logs.len(), 4);
        assert_eq!(result.dropped, 6);
        assert_eq!(result.logs[3].message, "m3");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(constants::MAX_LINE_PREVIEW + 10);
        let p = preview(&long);
        assert_eq!(p.chars().count(), constants::MAX_LINE_PREVIEW + 1);
        assert!(p.ends_with('\u{2026}'));
    }

    #[test]
    fn test_empty_content_yields_no_logs() {
        let result = parse_logs("", "empty.ndjson", &LoadConfig::default()).unwrap();
        assert!(result.logs.is_empty());
        assert_eq!(result.error_count, 0);
    }
}
