//! Parse the data file back into a [`ProjectList`].
//!
//! # Grammar
//!
//! ```text
//! PROJECT|<escaped project name>
//! TASK|<0|1>|<escaped description>|<YYYY-MM-DD|null>|<1|2|3>
//! ```
//!
//! Blank lines are skipped. A `TASK` record belongs to the closest `PROJECT`
//! record above it, so a `TASK` before any `PROJECT` is corruption.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;

use super::codec::{unescape, DELIMITER};
use super::error::{CorruptedDataError, LoadError, StorageError};
use crate::model::{Priority, Project, ProjectList, Task};

pub const PROJECT_PREFIX: &str = "PROJECT|";
pub const TASK_PREFIX: &str = "TASK|";

/// Written in place of a missing deadline.
pub const NO_DEADLINE: &str = "null";

const TASK_FIELD_COUNT: usize = 4;

/// Load the file at `path`.
///
/// A missing or zero-length file is an empty list, not an error.
pub fn load_file(path: &Path) -> Result<ProjectList, LoadError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No data file at {}, starting empty", path.display());
            return Ok(ProjectList::new());
        }
        Err(e) => {
            return Err(StorageError::from_io(
                format!("failed to open {}", path.display()),
                e,
            )
            .into())
        }
    };

    let list = parse(BufReader::new(file), path)?;
    log::debug!(
        "Loaded {} projects ({} tasks) from {}",
        list.len(),
        list.task_count(),
        path.display()
    );
    Ok(list)
}

/// Parse records from any buffered reader. `path` is only used in messages.
pub fn parse<R: BufRead>(reader: R, path: &Path) -> Result<ProjectList, LoadError> {
    let mut list = ProjectList::new();
    // Index of the project new tasks go into (None until the first PROJECT).
    let mut current: Option<usize> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(CorruptedDataError::new(line_number, "line is not valid UTF-8").into());
            }
            Err(e) => {
                return Err(StorageError::from_io(
                    format!("failed to read {} at line {line_number}", path.display()),
                    e,
                )
                .into())
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(PROJECT_PREFIX) {
            let project = parse_project(rest, line_number)?;
            list.add_project(project);
            current = Some(list.len() - 1);
        } else if let Some(rest) = line.strip_prefix(TASK_PREFIX) {
            let Some(project_index) = current else {
                return Err(CorruptedDataError::new(
                    line_number,
                    "task found without a project header",
                )
                .into());
            };
            let task = parse_task(rest, line_number)?;
            list.projects[project_index].add_task(task);
        } else {
            return Err(CorruptedDataError::new(
                line_number,
                "unknown record type (expected PROJECT| or TASK|)",
            )
            .into());
        }
    }

    Ok(list)
}

fn parse_project(rest: &str, line: usize) -> Result<Project, CorruptedDataError> {
    let name = unescape(rest);
    let name = name.trim();
    if name.is_empty() {
        return Err(CorruptedDataError::new(line, "project name cannot be empty"));
    }
    Ok(Project::new(name))
}

fn parse_task(rest: &str, line: usize) -> Result<Task, CorruptedDataError> {
    let fields: Vec<&str> = rest.split(DELIMITER).collect();
    if fields.len() != TASK_FIELD_COUNT {
        return Err(CorruptedDataError::new(
            line,
            format!(
                "task record must have {TASK_FIELD_COUNT} fields, found {}",
                fields.len()
            ),
        ));
    }

    let done = parse_done(fields[0], line)?;
    let description = unescape(fields[1]);
    let deadline = parse_deadline(fields[2], line)?;
    let priority = parse_priority(fields[3], line)?;

    let mut task = Task::new(description, deadline, priority);
    if done {
        task.mark_done();
    }
    Ok(task)
}

fn parse_done(field: &str, line: usize) -> Result<bool, CorruptedDataError> {
    match field.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(CorruptedDataError::new(
            line,
            format!("invalid done flag '{other}' (expected 0 or 1)"),
        )),
    }
}

fn parse_deadline(field: &str, line: usize) -> Result<Option<NaiveDate>, CorruptedDataError> {
    let field = field.trim();
    if field == NO_DEADLINE {
        return Ok(None);
    }

    let invalid = || {
        CorruptedDataError::new(
            line,
            format!("invalid deadline '{field}' (expected YYYY-MM-DD or {NO_DEADLINE})"),
        )
    };

    // chrono accepts unpadded months and days; the format does not.
    if field.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid())
}

fn parse_priority(field: &str, line: usize) -> Result<Priority, CorruptedDataError> {
    let field = field.trim();
    field
        .parse::<u8>()
        .ok()
        .and_then(Priority::from_value)
        .ok_or_else(|| {
            CorruptedDataError::new(
                line,
                format!("invalid priority '{field}' (expected 1, 2 or 3)"),
            )
        })
}

// ============================================================================
// TESTS
// ============================================================================
