//! Apply a parsed command to the in-memory project list.

use chrono::NaiveDate;
use flowcli_core::{Project, ProjectList, Task};

use crate::cli::Command;
use crate::error::CliError;
use crate::render::render_projects;

/// Run `command` against `list` and return what should be printed.
pub fn execute(
    list: &mut ProjectList,
    command: Command,
    today: NaiveDate,
) -> Result<String, CliError> {
    match command {
        Command::AddProject { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::EmptyProjectName);
            }
            list.add_project(Project::new(name));
            Ok(format!("Added project '{name}'"))
        }
        Command::RemoveProject { name } => {
            let removed = list
                .remove_project(&name)
                .ok_or(CliError::ProjectNotFound(name))?;
            Ok(format!(
                "Removed project '{}' ({} tasks)",
                removed.name,
                removed.tasks.len()
            ))
        }
        Command::AddTask {
            project,
            description,
            deadline,
            priority,
        } => {
            let target = find_project(list, &project)?;
            target.add_task(Task::new(description, deadline, priority));
            Ok(format!(
                "Added task {} to '{}'",
                target.tasks.len(),
                target.name
            ))
        }
        Command::Mark { project, index } => {
            let task = find_task(list, &project, index)?;
            task.mark_done();
            Ok(format!("Marked task {index} in '{project}' as done"))
        }
        Command::Unmark { project, index } => {
            let task = find_task(list, &project, index)?;
            task.mark_undone();
            Ok(format!("Marked task {index} in '{project}' as not done"))
        }
        Command::RemoveTask { project, index } => {
            let target = find_project(list, &project)?;
            let len = target.tasks.len();
            let removed = index
                .checked_sub(1)
                .and_then(|i| target.remove_task(i))
                .ok_or_else(|| CliError::TaskOutOfRange {
                    project: project.clone(),
                    index,
                    len,
                })?;
            Ok(format!(
                "Removed task '{}' from '{project}'",
                removed.description
            ))
        }
        Command::List {
            project,
            pending,
            json,
        } => list_projects(list, project.as_deref(), pending, json, today),
    }
}

fn list_projects(
    list: &ProjectList,
    project: Option<&str>,
    pending: bool,
    json: bool,
    today: NaiveDate,
) -> Result<String, CliError> {
    let selected: Vec<&Project> = match project {
        Some(name) => vec![list
            .find_project(name)
            .ok_or_else(|| CliError::ProjectNotFound(name.to_string()))?],
        None => list.iter().collect(),
    };

    if json {
        let mut export: Vec<Project> = selected.into_iter().cloned().collect();
        if pending {
            for p in &mut export {
                p.tasks.retain(|t| !t.done);
            }
        }
        return Ok(serde_json::to_string_pretty(&export)?);
    }

    Ok(render_projects(selected, pending, today)
        .trim_end()
        .to_string())
}

fn find_project<'a>(list: &'a mut ProjectList, name: &str) -> Result<&'a mut Project, CliError> {
    list.find_project_mut(name)
        .ok_or_else(|| CliError::ProjectNotFound(name.to_string()))
}

/// Look up a task by its 1-based position.
fn find_task<'a>(
    list: &'a mut ProjectList,
    project: &str,
    index: usize,
) -> Result<&'a mut Task, CliError> {
    let target = find_project(list, project)?;
    let len = target.tasks.len();
    if index == 0 || index > len {
        return Err(CliError::TaskOutOfRange {
            project: project.to_string(),
            index,
            len,
        });
    }
    Ok(&mut target.tasks[index - 1])
}

// ============================================================================
// TESTS
// ============================================================================
