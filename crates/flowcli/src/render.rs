//! Plain-text rendering of the project list.

use std::fmt::Write;

use chrono::NaiveDate;
use flowcli_core::{Project, Task};

/// Render projects as an indented, numbered listing.
///
/// Task numbers are the 1-based positions used by `mark`, `unmark` and
/// `remove-task`, so they stay stable when completed tasks are hidden.
pub fn render_projects<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    pending_only: bool,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let mut any = false;

    for project in projects {
        any = true;
        let _ = writeln!(
            out,
            "{} ({} of {} pending)",
            project.name,
            project.pending_count(),
            project.tasks.len()
        );
        for (i, task) in project.tasks.iter().enumerate() {
            if pending_only && task.done {
                continue;
            }
            let _ = writeln!(out, "  {}. {}", i + 1, render_task(task, today));
        }
    }

    if !any {
        out.push_str("No projects yet.\n");
    }
    out
}

fn render_task(task: &Task, today: NaiveDate) -> String {
    let mark = if task.done { "X" } else { " " };
    // Keep multi-line descriptions on one row.
    let description = task.description.replace('\n', " / ");
    let mut line = format!("[{mark}] {description} [{}]", task.priority);
    if let Some(deadline) = task.deadline {
        let _ = write!(line, " (by {deadline})");
    }
    if task.is_overdue(today) {
        line.push_str(" OVERDUE");
    }
    line
}

// ============================================================================
// TESTS
// ============================================================================
