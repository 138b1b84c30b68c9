//! Locations of the data, temp and backup files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATA_FILE_NAME: &str = "flowcli-data.txt";
pub const TEMP_FILE_NAME: &str = "flowcli-data.tmp";
pub const TEMP_SUFFIX: &str = ".tmp";
pub const BACKUP_SUFFIX: &str = ".backup";

/// Paths used by [`Storage`](super::Storage).
///
/// The temp file must sit in the same directory as the data file, otherwise
/// the final rename is not atomic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_file: PathBuf,
    pub temp_file: PathBuf,
    pub backup_file: PathBuf,
}

impl StorageConfig {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DATA_FILE_NAME),
            temp_file: dir.join(TEMP_FILE_NAME),
            backup_file: dir.join(format!("{DATA_FILE_NAME}{BACKUP_SUFFIX}")),
        }
    }

    /// Derive temp and backup paths from an arbitrary data file path.
    ///
    /// Both are suffixes on the full file name, so `notes.txt` gets
    /// `notes.txt.tmp` and `notes.txt.backup`, and neither can ever equal
    /// the data file.
    pub fn for_data_file(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        Self {
            temp_file: with_suffix(&data_file, TEMP_SUFFIX),
            backup_file: with_suffix(&data_file, BACKUP_SUFFIX),
            data_file,
        }
    }

    /// Directory holding the data file.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_file.parent()
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

// ============================================================================
// TESTS
// ============================================================================
