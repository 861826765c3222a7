// LogDash - platform/fs.rs
//
// Filesystem access for log files.

use crate::util::constants::MAX_LOG_FILE_SIZE;
use crate::util::error::LoadError;
use std::path::Path;

/// Read a log file as text.
///
/// Files above `MAX_LOG_FILE_SIZE` are refused before reading. Invalid UTF-8
/// is replaced rather than rejected so one bad byte does not hide a whole file.
pub fn read_log_file(path: &Path) -> Result<String, LoadError> {
    let io_err = |e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_LOG_FILE_SIZE {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_LOG_FILE_SIZE,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %path.display(), "Log file is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_log_file(&dir.path().join("absent.ndjson"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ndjson");
        std::fs::write(&path, b"{\"message\":\"caf\xe9\"}\n").unwrap();
        let text = read_log_file(&path).unwrap();
        assert!(text.contains('\u{fffd}'));
    }
}
