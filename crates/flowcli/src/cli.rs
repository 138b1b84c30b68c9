//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flowcli_core::{Priority, StorageConfig};

#[derive(Parser, Debug)]
#[command(name = "flowcli", version, about = "Track tasks across projects")]
pub struct Cli {
    /// Directory holding the data file
    #[arg(long, env = "FLOWCLI_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Use this data file instead of the standard one in --data-dir
    #[arg(long, env = "FLOWCLI_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Storage paths selected by `--data-file` or `--data-dir`.
    pub fn storage_config(&self) -> StorageConfig {
        match &self.data_file {
            Some(file) => StorageConfig::for_data_file(file.clone()),
            None => StorageConfig::in_dir(&self.data_dir),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new project
    AddProject { name: String },

    /// Delete a project and all of its tasks
    RemoveProject { name: String },

    /// Add a task to a project
    AddTask {
        project: String,
        description: String,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,

        /// low, medium or high
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },

    /// Mark a task as done (1-based index)
    Mark { project: String, index: usize },

    /// Mark a task as not done (1-based index)
    Unmark { project: String, index: usize },

    /// Delete a task (1-based index)
    RemoveTask { project: String, index: usize },

    /// Show projects and tasks
    List {
        /// Only show this project
        #[arg(long)]
        project: Option<String>,

        /// Hide completed tasks
        #[arg(long)]
        pending: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Whether running this command changes the project list.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::List { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
