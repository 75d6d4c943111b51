// Loader module: reads the log file selected on the command line into a
// `LogPayload`. Reading never fails on content: bytes that are not valid
// UTF-8 are replaced with U+FFFD.

use crate::error::AnalysisError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Number of characters shown by the "First 100 characters" diagnostic.
pub const PREVIEW_CHARS: usize = 100;

/// Raw text of one log file plus its character count. Lives for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPayload {
    text: String,
    char_count: usize,
}

impl LogPayload {
    /// Decode raw file bytes, replacing undecodable sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).into_owned();
        let char_count = text.chars().count();
        LogPayload { text, char_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Length of the UTF-8 encoded body that goes on the wire.
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// The first `PREVIEW_CHARS` characters, or the whole text when shorter.
    pub fn preview(&self) -> &str {
        match self.text.char_indices().nth(PREVIEW_CHARS) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Read the whole file at `path`. A missing path is reported as
/// `InputNotFound` so the caller can skip the upload.
pub fn load(path: &Path) -> Result<LogPayload, AnalysisError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            AnalysisError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AnalysisError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let payload = LogPayload::from_bytes(&bytes);
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        chars = payload.char_count(),
        "loaded log file"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_whole_text_when_short() {
        let payload = LogPayload::from_bytes(b"short line\n");
        assert_eq!(payload.preview(), "short line\n");
        assert_eq!(payload.char_count(), 11);
    }

    #[test]
    fn preview_stops_at_one_hundred_characters() {
        let text = "é".repeat(150);
        let payload = LogPayload::from_bytes(text.as_bytes());
        assert_eq!(payload.char_count(), 150);
        assert_eq!(payload.byte_len(), 300);
        assert_eq!(payload.preview().chars().count(), PREVIEW_CHARS);
        assert_eq!(payload.preview(), "é".repeat(100));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let payload = LogPayload::from_bytes(&[b'o', b'k', 0xff, 0xfe, b'!']);
        assert_eq!(payload.text(), "ok\u{fffd}\u{fffd}!");
        assert_eq!(payload.char_count(), 5);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.log");
        let err = load(&missing).unwrap_err();
        assert!(matches!(err, AnalysisError::InputNotFound { ref path } if path == &missing));
    }

    #[test]
    fn load_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::InputUnreadable { .. }));
    }

    #[test]
    fn load_reads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.log");
        std::fs::write(&path, "Failed password for root\n").unwrap();
        let payload = load(&path).unwrap();
        assert_eq!(payload.into_text(), "Failed password for root\n");
    }
}
