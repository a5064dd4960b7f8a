//! # Log Sources
//!
//! Scoped, line-by-line reads of a log file.
//!
//! A missing log file is an empty source, not an error. Every call to
//! [`LogFile::lines`] opens the file afresh, so the replay pass and the merge
//! pass are two independent traversals.

use crate::GamelogError;
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

/// A log file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    /// Refer to a log file. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file for one pass over its lines.
    ///
    /// Returns an empty iterator if the file does not exist.
    pub fn lines(&self) -> Result<LogLines, GamelogError> {
        match File::open(&self.path) {
            Ok(file) => Ok(LogLines {
                path: self.path.clone(),
                inner: Some(BufReader::new(file).split(b'\n')),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LogLines {
                path: self.path.clone(),
                inner: None,
            }),
            Err(e) => Err(GamelogError::Io(format!(
                "Cannot open {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Iterator over the lines of one open log file.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// single corrupt line cannot abort the pass. The file handle is released
/// when the iterator is dropped.
pub struct LogLines {
    path: PathBuf,
    inner: Option<Split<BufReader<File>>>,
}

impl Iterator for LogLines {
    type Item = Result<String, GamelogError>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.inner.as_mut()?.next()?;
        Some(
            chunk
                .map(|bytes| {
                    let decoded = String::from_utf8_lossy(&bytes);
                    let line: &str = &decoded;
                    line.strip_suffix('\r').unwrap_or(line).to_string()
                })
                .map_err(|e| {
                    GamelogError::Io(format!("Read {}: {}", self.path.display(), e))
                }),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = LogFile::new(dir.path().join("absent.txt"));

        let lines: Vec<_> = log.lines().expect("open").collect();
        assert!(lines.is_empty());
    }

    #[test]
    fn reads_lines_in_order_and_strips_crlf() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "first\r\nsecond\n\nthird").expect("write");

        let lines: Vec<String> = LogFile::new(&path)
            .lines()
            .expect("open")
            .collect::<Result<_, _>>()
            .expect("read");
        assert_eq!(lines, vec!["first", "second", "", "third"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.txt");
        std::fs::write(&path, b"ok\n\xff\xfe\n").expect("write");

        let lines: Vec<String> = LogFile::new(&path)
            .lines()
            .expect("open")
            .collect::<Result<_, _>>()
            .expect("read");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok");
        assert!(lines[1].contains('\u{FFFD}'));
    }

    #[test]
    fn each_pass_reopens_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "a\nb\n").expect("write");

        let log = LogFile::new(&path);
        assert_eq!(log.lines().expect("open").count(), 2);
        assert_eq!(log.lines().expect("open").count(), 2);
    }
}
