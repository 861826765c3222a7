// LogDash - core/export.rs
//
// CSV and JSON export of filtered log records.
// Core layer: writes to any Write trait object.

use crate::core::model::Log;
use crate::util::constants::MAX_EXPORT_ENTRIES;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

fn check_count(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count,
            max: MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export records to CSV.
///
/// Columns: timestamp, level, message, metadata. Timestamp and level are
/// written exactly as received; metadata is compact JSON (empty if absent).
pub fn export_csv<W: Write>(
    logs: &[&Log],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(logs.len())?;
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["timestamp", "level", "message", "metadata"])
        .map_err(csv_err)?;

    for log in logs {
        let metadata = log
            .metadata
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default();
        csv_writer
            .write_record([
                log.timestamp.as_str(),
                log.level.as_str(),
                log.message.as_str(),
                metadata.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %export_path.display(), count = logs.len(), "CSV export written");
    Ok(logs.len())
}

/// Export records as a pretty-printed JSON array that `core::loader` can
/// read back.
pub fn export_json<W: Write>(
    logs: &[&Log],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(logs.len())?;
    serde_json::to_writer_pretty(writer, logs).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %export_path.display(), count = logs.len(), "JSON export written");
    Ok(logs.len())
}

/// Output layout for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Short name for menus and status text.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Write `logs` to `writer` in this format.
    pub fn write<W: Write>(
        self,
        logs: &[&Log],
        writer: W,
        export_path: &Path,
    ) -> Result<usize, ExportError> {
        match self {
            ExportFormat::Csv => export_csv(logs, writer, export_path),
            ExportFormat::Json => export_json(logs, writer, export_path),
        }
    }
}
