//! Storage façade: the only entry point the application uses.

use std::fs;
use std::path::PathBuf;

use super::config::StorageConfig;
use super::error::{LoadError, StorageError};
use super::{loader, writer};
use crate::model::ProjectList;

/// Loads and saves the project list at the configured paths.
///
/// Holds no model state between calls: `save` takes a snapshot and `load`
/// returns a fresh list every time.
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Load the project list.
    ///
    /// If the file is corrupted it is first copied to the backup path, then
    /// the corruption error is returned with `backup` set to that path. A
    /// failed backup is logged, leaves `backup` empty and does not replace
    /// the original error. Callers are expected to carry on with an empty
    /// list.
    pub fn load(&self) -> Result<ProjectList, LoadError> {
        match loader::load_file(&self.config.data_file) {
            Err(LoadError::Corrupted(mut err)) => {
                log::warn!(
                    "Data file {} is corrupted: {}",
                    self.config.data_file.display(),
                    err
                );
                err.backup = self.backup_corrupted();
                Err(LoadError::Corrupted(err))
            }
            other => other,
        }
    }

    /// Replace the data file with a snapshot of `list`.
    pub fn save(&self, list: &ProjectList) -> Result<(), StorageError> {
        writer::write_atomic(&self.config, list).map_err(|err| {
            log::error!("Failed to save {}: {}", self.config.data_file.display(), err);
            err
        })
    }

    fn backup_corrupted(&self) -> Option<PathBuf> {
        let from = &self.config.data_file;
        let to = &self.config.backup_file;
        match fs::copy(from, to) {
            Ok(_) => {
                log::info!("Backed up corrupted data to {}", to.display());
                Some(to.clone())
            }
            Err(e) => {
                log::warn!(
                    "Could not back up corrupted data {} to {}: {}",
                    from.display(),
                    to.display(),
                    e
                );
                None
            }
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Project, Task};
    use crate::persistence::StorageErrorKind;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn storage_in(dir: &std::path::Path) -> Storage {
        Storage::new(StorageConfig::in_dir(dir))
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn scenario_save_then_load() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut task = Task::new("Assignment", date(2025, 12, 31), Priority::High);
        task.mark_done();
        let mut project = Project::new("CS2113");
        project.add_task(task);
        let mut list = ProjectList::new();
        list.add_project(project);

        storage.save(&list).unwrap();

        let contents = fs::read_to_string(&storage.config().data_file).unwrap();
        assert_eq!(contents, "PROJECT|CS2113\nTASK|1|Assignment|2025-12-31|3\n");

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        let loaded_task = &loaded.projects[0].tasks[0];
        assert!(loaded_task.done);
        assert_eq!(loaded_task.deadline, date(2025, 12, 31));
        assert_eq!(loaded_task.priority.value(), 3);
    }

    #[test]
    fn round_trip_preserves_awkward_text() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut list = ProjectList::new();
        let mut first = Project::new("Work | Home");
        first.add_task(Task::new("multi\nline\ndescription", None, Priority::Low));
        first.add_task(Task::new("", date(2024, 2, 29), Priority::Medium));
        first.add_task(Task::new("<PIPE <NEWLINE partial tokens", None, Priority::High));
        first.add_task(Task::new("日本語 ✓ émoji 🚀 | done", date(1999, 1, 1), Priority::Low));
        first.tasks[1].mark_done();
        list.add_project(first);
        list.add_project(Project::new("Empty project"));
        let mut third = Project::new("Third");
        third.add_task(Task::new("x", None, Priority::Medium));
        list.add_project(third);

        storage.save(&list).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, list);
    }

    #[test]
    fn paragraph_breaks_and_double_pipes_round_trip() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut project = Project::new("a || b");
        project.add_task(Task::new("para one\n\npara two", None, Priority::Medium));
        project.add_task(Task::new("a || b", None, Priority::Low));
        project.add_task(Task::new("|||\n\n\n", None, Priority::High));
        let mut list = ProjectList::new();
        list.add_project(project);

        storage.save(&list).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded, list);
        assert_eq!(loaded.projects[0].tasks[0].description, "para one\n\npara two");
        assert_eq!(loaded.projects[0].tasks[1].description, "a || b");
    }

    #[test]
    fn round_trip_strips_carriage_returns() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut project = Project::new("P");
        project.add_task(Task::new("windows\r\nline", None, Priority::Low));
        let mut list = ProjectList::new();
        list.add_project(project);

        storage.save(&list).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.projects[0].tasks[0].description, "windows\nline");
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut list = ProjectList::new();
        list.add_project(Project::new("A"));
        list.add_project(Project::new("B"));
        storage.save(&list).unwrap();

        list.remove_project("A");
        storage.save(&list).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.projects[0].name, "B");
    }

    #[test]
    fn load_missing_and_empty_files() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());
        assert!(storage.load().unwrap().is_empty());

        fs::write(&storage.config().data_file, "").unwrap();
        assert!(storage.load().unwrap().is_empty());
        assert!(!storage.config().backup_file.exists());
    }

    #[test]
    fn corrupted_file_is_backed_up_byte_for_byte() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());
        let original = "PROJECT|A\nTASK|0|ok|null|2\ngarbage line\n";
        fs::write(&storage.config().data_file, original).unwrap();

        let err = storage.load().unwrap_err();

        match err {
            LoadError::Corrupted(e) => {
                assert_eq!(e.line, 3);
                assert_eq!(e.backup.as_ref(), Some(&storage.config().backup_file));
            }
            other => panic!("expected corruption, got {other:?}"),
        }
        let backup = fs::read(&storage.config().backup_file).unwrap();
        assert_eq!(backup, original.as_bytes());
        // The corrupted file itself is left alone.
        assert_eq!(
            fs::read_to_string(&storage.config().data_file).unwrap(),
            original
        );
    }

    #[test]
    fn failed_backup_still_reports_corruption() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());
        fs::write(&storage.config().data_file, "TASK|0|x|null|2\n").unwrap();
        // A non-empty directory at the backup path makes the copy fail.
        fs::create_dir(&storage.config().backup_file).unwrap();
        fs::write(storage.config().backup_file.join("occupied"), "x").unwrap();

        let err = storage.load().unwrap_err();

        match err {
            LoadError::Corrupted(e) => {
                assert!(e.reason.contains("without a project"));
                // Something already sits at the backup path, but this load
                // did not put it there.
                assert!(storage.config().backup_file.exists());
                assert_eq!(e.backup, None);
            }
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn save_into_file_masquerading_as_directory_fails() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        fs::write(&data_dir, "I am a file").unwrap();
        let storage = storage_in(&data_dir);

        let err = storage.save(&ProjectList::new()).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::Io);
        assert_eq!(fs::read_to_string(&data_dir).unwrap(), "I am a file");
    }

    #[test]
    fn load_directory_in_place_of_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path());
        fs::create_dir(&storage.config().data_file).unwrap();

        let err = storage.load().unwrap_err();
        assert!(matches!(err, LoadError::Storage(_)));
        assert!(!storage.config().backup_file.exists());
    }
}
