//! Serialize a [`ProjectList`] and atomically replace the data file.
//!
//! # Atomic Write Strategy
//!
//! 1. Make sure the data directory exists (and is a directory)
//! 2. Write the full snapshot to the temp file and `fsync` it
//! 3. Rename the temp file over the data file
//!
//! The temp file lives next to the data file so the rename never crosses a
//! filesystem. Readers see either the old file or the new one, never a
//! partial write. If anything fails the temp file is removed.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use super::codec::escape;
use super::config::StorageConfig;
use super::error::{StorageError, StorageErrorKind};
use super::loader::{NO_DEADLINE, PROJECT_PREFIX, TASK_PREFIX};
use crate::model::{ProjectList, Task};

/// Render the whole list in the on-disk record format.
pub fn serialize(list: &ProjectList) -> String {
    let mut out = String::new();
    for project in list {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{PROJECT_PREFIX}{}", escape(&project.name));
        for task in &project.tasks {
            let _ = writeln!(out, "{TASK_PREFIX}{}", task_fields(task));
        }
    }
    out
}

fn task_fields(task: &Task) -> String {
    let done = if task.done { "1" } else { "0" };
    let deadline = task
        .deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_DEADLINE.to_string());
    format!(
        "{done}|{}|{deadline}|{}",
        escape(&task.description),
        task.priority.value()
    )
}

/// Write `list` to `config.data_file` through `config.temp_file`.
pub fn write_atomic(config: &StorageConfig, list: &ProjectList) -> Result<(), StorageError> {
    if config.temp_file == config.data_file {
        return Err(StorageError::new(
            StorageErrorKind::Io,
            format!(
                "temp file {} is the data file itself",
                config.temp_file.display()
            ),
        ));
    }
    if let Some(dir) = config.data_file.parent() {
        ensure_dir(dir)?;
    }

    let contents = serialize(list);

    if let Err(e) = write_temp(&config.temp_file, contents.as_bytes()) {
        remove_temp(&config.temp_file);
        return Err(StorageError::from_io(
            format!("failed to write {}", config.temp_file.display()),
            e,
        ));
    }

    if let Err(e) = replace_file(&config.temp_file, &config.data_file) {
        remove_temp(&config.temp_file);
        return Err(StorageError::from_io(
            format!(
                "failed to replace {} with {}",
                config.data_file.display(),
                config.temp_file.display()
            ),
            e,
        ));
    }

    if let Some(dir) = config.data_file.parent() {
        sync_dir(dir);
    }

    log::debug!(
        "Saved {} projects ({} tasks) to {}",
        list.len(),
        list.task_count(),
        config.data_file.display()
    );
    Ok(())
}

/// Create `dir` if needed, refusing to touch a non-directory in the way.
fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    // Walk up so a plain file anywhere in the chain is reported, not clobbered.
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        match fs::metadata(ancestor) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => {
                return Err(StorageError::new(
                    StorageErrorKind::Io,
                    format!(
                        "cannot create data directory {}: {} exists and is not a directory",
                        dir.display(),
                        ancestor.display()
                    ),
                ));
            }
            Err(_) => continue,
        }
    }

    if !dir.is_dir() {
        log::info!("Creating data directory {}", dir.display());
    }
    fs::create_dir_all(dir).map_err(|e| {
        StorageError::from_io(format!("failed to create directory {}", dir.display()), e)
    })
}

fn write_temp(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}

/// Move `from` over `to`.
///
/// `rename` replaces the target atomically on POSIX and on Windows. Some
/// filesystems refuse to rename over an existing file; for those the target
/// is removed first, which leaves a short window with no data file.
fn replace_file(from: &Path, to: &Path) -> io::Result<()> {
    replace_file_with(from, to, |from, to| fs::rename(from, to))
}

fn replace_file_with<F>(from: &Path, to: &Path, rename: F) -> io::Result<()>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            log::warn!(
                "Atomic rename over {} not supported, falling back to remove-then-rename",
                to.display()
            );
            fs::remove_file(to)?;
            rename(from, to)
        }
        Err(e) => Err(e),
    }
}

fn remove_temp(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to remove temp file {}: {}", path.display(), e),
    }
}

/// Flush the rename itself to disk. Best effort.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        log::debug!("Could not sync directory {}: {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

// ============================================================================
// TESTS
// ============================================================================
