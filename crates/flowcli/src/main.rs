//! FlowCLI - a personal task tracker.
//!
//! Each invocation loads the data file once, applies one command and, if the
//! command changed anything, saves the whole list back before exiting.

mod cli;
mod commands;
mod error;
mod render;

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use flowcli_core::{LoadError, ProjectList, Storage};

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match run(cli, today) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, today: NaiveDate) -> Result<String, CliError> {
    let config = cli.storage_config();
    log::debug!("Using data file {}", config.data_file.display());
    let storage = Storage::new(config);
    let mut list = load_or_recover(&storage)?;

    let mutating = cli.command.is_mutating();
    let output = commands::execute(&mut list, cli.command, today)?;

    if mutating {
        storage.save(&list)?;
        log::debug!("Saved {} projects", list.len());
    }
    Ok(output)
}

/// Load the list, starting empty if the data file is corrupted.
fn load_or_recover(storage: &Storage) -> Result<ProjectList, CliError> {
    match storage.load() {
        Ok(list) => Ok(list),
        Err(LoadError::Corrupted(e)) => {
            eprintln!("warning: {e}");
            if let Some(backup) = &e.backup {
                eprintln!(
                    "warning: the unreadable file was copied to {}",
                    backup.display()
                );
            }
            eprintln!("warning: starting with an empty task list");
            Ok(ProjectList::new())
        }
        Err(LoadError::Storage(e)) => Err(e.into()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn invoke(dir: &Path, args: &[&str]) -> Result<String, CliError> {
        let data_dir = dir.to_str().unwrap();
        let mut argv = vec!["flowcli", "--data-dir", data_dir];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap(), today())
    }

    #[test]
    fn mutating_commands_are_saved() {
        let dir = tempdir().unwrap();

        invoke(dir.path(), &["add-project", "CS2113"]).unwrap();
        invoke(
            dir.path(),
            &[
                "add-task",
                "CS2113",
                "Assignment",
                "--deadline",
                "2025-12-31",
                "--priority",
                "high",
            ],
        )
        .unwrap();
        invoke(dir.path(), &["mark", "CS2113", "1"]).unwrap();

        let contents = fs::read_to_string(dir.path().join("flowcli-data.txt")).unwrap();
        assert_eq!(contents, "PROJECT|CS2113\nTASK|1|Assignment|2025-12-31|3\n");
    }

    #[test]
    fn list_does_not_create_data_file() {
        let dir = tempdir().unwrap();
        let output = invoke(dir.path(), &["list"]).unwrap();

        assert_eq!(output, "No projects yet.");
        assert!(!dir.path().join("flowcli-data.txt").exists());
    }

    #[test]
    fn failed_command_does_not_save() {
        let dir = tempdir().unwrap();
        invoke(dir.path(), &["add-project", "A"]).unwrap();
        let before = fs::read_to_string(dir.path().join("flowcli-data.txt")).unwrap();

        let result = invoke(dir.path(), &["mark", "A", "3"]);

        assert!(matches!(result, Err(CliError::TaskOutOfRange { .. })));
        let after = fs::read_to_string(dir.path().join("flowcli-data.txt")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn corrupted_file_is_backed_up_and_replaced_on_next_save() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("flowcli-data.txt");
        fs::write(&data_file, "not a record\n").unwrap();

        invoke(dir.path(), &["add-project", "Fresh"]).unwrap();

        let backup = fs::read_to_string(dir.path().join("flowcli-data.txt.backup")).unwrap();
        assert_eq!(backup, "not a record\n");
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "PROJECT|Fresh\n");
    }

    #[test]
    fn explicit_data_file_with_tmp_extension_is_not_truncated() {
        let dir = tempdir().unwrap();
        let data_file = dir.path().join("tasks.tmp");
        let path = data_file.to_str().unwrap();

        let cli = Cli::try_parse_from(["flowcli", "--data-file", path, "add-project", "A"]).unwrap();
        run(cli, today()).unwrap();
        let cli = Cli::try_parse_from(["flowcli", "--data-file", path, "add-project", "B"]).unwrap();
        run(cli, today()).unwrap();

        assert_eq!(
            fs::read_to_string(&data_file).unwrap(),
            "PROJECT|A\nPROJECT|B\n"
        );
        assert!(!dir.path().join("tasks.tmp.tmp").exists());
    }

    #[test]
    fn storage_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let result = invoke(&blocker, &["add-project", "A"]);
        assert!(matches!(result, Err(CliError::Storage(_))));
    }
}
