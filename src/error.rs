//! Error types for vedit.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type alias for vedit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failed file read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoFailure {
    /// The file does not exist.
    NotFound,
    /// The process lacks permission to read or write the file.
    PermissionDenied,
    /// The device has no space left.
    DiskFull,
    /// Any other I/O failure.
    Other,
}

impl IoFailure {
    /// Classify an I/O error.
    #[must_use]
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
                Self::PermissionDenied
            }
            io::ErrorKind::StorageFull => Self::DiskFull,
            _ if err.raw_os_error() == Some(libc::ENOSPC) => Self::DiskFull,
            _ => Self::Other,
        }
    }

    /// Short lowercase description.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::DiskFull => "disk full",
            Self::Other => "I/O error",
        }
    }
}

/// Error type for vedit operations.
#[derive(Debug)]
pub enum Error {
    /// Buffer addressed outside its valid line/column range.
    OutOfRange {
        line: usize,
        column: usize,
        line_count: usize,
        line_len: Option<usize>,
    },
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        kind: IoFailure,
        source: io::Error,
    },
    /// Terminal backend failure (raw mode, size query, output).
    Terminal(io::Error),
}

impl Error {
    /// Wrap an I/O error raised while accessing `path`.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            kind: IoFailure::classify(&source),
            source,
        }
    }

    /// The I/O failure class, if this is a file error.
    #[must_use]
    pub fn io_failure(&self) -> Option<IoFailure> {
        match self {
            Self::Io { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check whether this is an out-of-range error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                line,
                column,
                line_count,
                line_len: None,
            } => write!(
                f,
                "position ({line}, {column}) out of range: buffer has {line_count} lines"
            ),
            Self::OutOfRange {
                line,
                column,
                line_len: Some(len),
                ..
            } => write!(
                f,
                "position ({line}, {column}) out of range: line {line} has {len} columns"
            ),
            Self::Io { path, kind, source } => {
                write!(f, "{}: {} ({source})", path.display(), kind.describe())
            }
            Self::Terminal(e) => write!(f, "terminal error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Terminal(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange {
            line: 4,
            column: 0,
            line_count: 2,
            line_len: None,
        };
        assert!(err.to_string().contains("buffer has 2 lines"));

        let err = Error::OutOfRange {
            line: 0,
            column: 9,
            line_count: 1,
            line_len: Some(3),
        };
        assert!(err.to_string().contains("line 0 has 3 columns"));

        let err = Error::io(
            Path::new("notes.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("notes.txt: permission denied"));
        assert_eq!(err.io_failure(), Some(IoFailure::PermissionDenied));
    }

    #[test]
    fn test_classify() {
        let not_found = io::Error::new(io::ErrorKind::NotFound, "x");
        assert_eq!(IoFailure::classify(&not_found), IoFailure::NotFound);

        let full = io::Error::from_raw_os_error(libc::ENOSPC);
        assert_eq!(IoFailure::classify(&full), IoFailure::DiskFull);

        let other = io::Error::new(io::ErrorKind::InvalidData, "x");
        assert_eq!(IoFailure::classify(&other), IoFailure::Other);
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let err = Error::Terminal(io::Error::other("tty gone"));
        assert!(err.source().is_some());

        let err = Error::OutOfRange {
            line: 1,
            column: 1,
            line_count: 1,
            line_len: None,
        };
        assert!(err.source().is_none());
        assert!(err.is_out_of_range());
    }
}
