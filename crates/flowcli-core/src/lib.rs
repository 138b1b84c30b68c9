//! # flowcli-core
//!
//! Core of FlowCLI, a personal task tracker.
//!
//! This crate is front-end agnostic and is used by the `flowcli` binary.
//!
//! ## Key Concepts
//!
//! - **Project**: A named, ordered list of tasks
//! - **Task**: Description, done flag, optional deadline and priority
//! - **Storage**: Loads and atomically saves the whole project list

pub mod model;
pub mod persistence;

// Re-export commonly used types
pub use model::{Priority, Project, ProjectList, Task};
pub use persistence::{LoadError, Storage, StorageConfig, StorageError};
