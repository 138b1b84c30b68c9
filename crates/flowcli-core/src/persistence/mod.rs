//! Persistence layer for the project list.
//!
//! # Overview
//!
//! - **Codec** - escapes free text so it fits inside a single record field
//! - **Loader** - parses the data file, reporting corruption by line number
//! - **Writer** - serializes the list and atomically replaces the data file
//! - **Storage** - façade tying the above together, with corruption backups
//!
//! # File Locations
//!
//! Paths come from [`StorageConfig`]; the defaults are:
//!
//! ```text
//! data/
//! ├── flowcli-data.txt          # Data file
//! ├── flowcli-data.tmp          # Temp file, only present mid-save
//! └── flowcli-data.txt.backup   # Copy of the last corrupted data file
//! ```
//!
//! # File Format
//!
//! ```text
//! PROJECT|CS2113
//! TASK|1|Assignment|2025-12-31|3
//! TASK|0|Revise<PIPE>notes|null|2
//! ```
//!
//! # Design Principles
//!
//! ## Atomic Writes
//!
//! Every save writes the complete snapshot to the temp file and renames it
//! over the data file. There are no partial or incremental saves.
//!
//! ## Single Writer
//!
//! Nothing coordinates two processes saving to the same file. Each rename is
//! atomic, and the last one wins.
//!
//! # Usage
//!
//! ```ignore
//! use flowcli_core::persistence::{LoadError, Storage, StorageConfig};
//!
//! let storage = Storage::new(StorageConfig::in_dir("data"));
//! let mut list = match storage.load() {
//!     Ok(list) => list,
//!     Err(LoadError::Corrupted(_)) => ProjectList::new(),
//!     Err(LoadError::Storage(e)) => return Err(e.into()),
//! };
//! storage.save(&list)?;
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod loader;
pub mod storage;
pub mod writer;

pub use config::StorageConfig;
pub use error::{CorruptedDataError, LoadError, StorageError, StorageErrorKind};
pub use storage::Storage;
