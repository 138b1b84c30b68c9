use flowcli_core::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project name cannot be empty")]
    EmptyProjectName,

    #[error("Project '{project}' has no task {index} (it has {len})")]
    TaskOutOfRange {
        project: String,
        index: usize,
        len: usize,
    },
}
