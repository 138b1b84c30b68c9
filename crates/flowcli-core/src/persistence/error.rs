//! Error types for the persistence layer.
//!
//! Two families:
//!
//! - [`CorruptedDataError`] - the file exists but does not follow the record
//!   grammar. Always carries the 1-based line number.
//! - [`StorageError`] - the OS refused a read, write, rename or directory
//!   operation. Categorized by [`StorageErrorKind`].
//!
//! `load` can fail with either (wrapped in [`LoadError`]); `save` can only
//! fail with a `StorageError`. Nothing in this module retries.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The data file does not follow the record grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("corrupted data at line {line}: {reason}")]
pub struct CorruptedDataError {
    /// 1-based line number of the offending record.
    pub line: usize,
    pub reason: String,
    /// Where the unreadable file was copied, if the copy made during this
    /// load succeeded.
    pub backup: Option<PathBuf>,
}

impl CorruptedDataError {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
            backup: None,
        }
    }
}

/// Category of an I/O failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    PermissionDenied,
    DiskFull,
    /// The file is held open or locked by another process.
    Locked,
    /// Anything that does not fit the categories above.
    Io,
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StorageErrorKind::PermissionDenied => "permission denied",
            StorageErrorKind::DiskFull => "disk full",
            StorageErrorKind::Locked => "file locked or in use",
            StorageErrorKind::Io => "I/O error",
        };
        f.write_str(text)
    }
}

/// An OS-level failure while reading or writing the data file.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct StorageError {
    pub kind: StorageErrorKind,
    pub message: String,
    #[source]
    pub source: Option<io::Error>,
}

impl StorageError {
    /// Build an error that has no underlying `io::Error`.
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Categorize `err` and attach a description of what was being attempted.
    pub fn from_io(context: impl fmt::Display, err: io::Error) -> Self {
        let kind = classify(&err);
        Self {
            kind,
            message: format!("{context}: {err}"),
            source: Some(err),
        }
    }
}

/// Either failure `load` can report.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Corrupted(#[from] CorruptedDataError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ============================================================================
// Classification
// ============================================================================

/// Map an `io::Error` onto a [`StorageErrorKind`].
///
/// The portable `ErrorKind` is checked first, then the raw OS code.
pub fn classify(err: &io::Error) -> StorageErrorKind {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return StorageErrorKind::PermissionDenied;
    }

    match err.raw_os_error() {
        Some(code) => classify_os_code(code),
        None => StorageErrorKind::Io,
    }
}

#[cfg(unix)]
fn classify_os_code(code: i32) -> StorageErrorKind {
    match code {
        libc::EACCES | libc::EPERM | libc::EROFS => StorageErrorKind::PermissionDenied,
        libc::ENOSPC | libc::EDQUOT => StorageErrorKind::DiskFull,
        libc::EBUSY | libc::ETXTBSY | libc::EWOULDBLOCK => StorageErrorKind::Locked,
        _ => StorageErrorKind::Io,
    }
}

#[cfg(windows)]
fn classify_os_code(code: i32) -> StorageErrorKind {
    const ERROR_ACCESS_DENIED: i32 = 5;
    const ERROR_SHARING_VIOLATION: i32 = 32;
    const ERROR_LOCK_VIOLATION: i32 = 33;
    const ERROR_HANDLE_DISK_FULL: i32 = 39;
    const ERROR_DISK_FULL: i32 = 112;

    match code {
        ERROR_ACCESS_DENIED => StorageErrorKind::PermissionDenied,
        ERROR_HANDLE_DISK_FULL | ERROR_DISK_FULL => StorageErrorKind::DiskFull,
        ERROR_SHARING_VIOLATION | ERROR_LOCK_VIOLATION => StorageErrorKind::Locked,
        _ => StorageErrorKind::Io,
    }
}

#[cfg(not(any(unix, windows)))]
fn classify_os_code(_code: i32) -> StorageErrorKind {
    StorageErrorKind::Io
}

// ============================================================================
// TESTS
// ============================================================================
