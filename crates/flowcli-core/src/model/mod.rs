//! In-memory domain model.
//!
//! The application owns these values. The persistence layer takes a
//! snapshot on save and hands back a fresh `ProjectList` on load; it never
//! holds on to either.

mod project;
mod task;

pub use project::{Project, ProjectList};
pub use task::{ParsePriorityError, Priority, Task};
