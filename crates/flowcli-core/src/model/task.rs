//! Tasks and their priority.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority. The discriminant is the value written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl Priority {
    /// Numeric value used in the on-disk format.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Map a stored numeric value back to a priority.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Priority::Low),
            2 => Some(Priority::Medium),
            3 => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(name)
    }
}

/// Error returned when a priority string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority '{0}' (expected low, medium, high or 1-3)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Ok(Priority::Low),
            "medium" | "2" => Ok(Priority::Medium),
            "high" | "3" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A single task inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Free text; may be empty.
    pub description: String,

    /// Whether the task has been completed.
    pub done: bool,

    /// Optional due date (no time component).
    #[serde(default)]
    pub deadline: Option<NaiveDate>,

    pub priority: Priority,
}

impl Task {
    /// Create a new, not-yet-done task.
    pub fn new(
        description: impl Into<String>,
        deadline: Option<NaiveDate>,
        priority: Priority,
    ) -> Self {
        Self {
            description: description.into(),
            done: false,
            deadline,
            priority,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// True when the deadline has passed and the task is still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.deadline.is_some_and(|d| d < today)
    }
}

// ============================================================================
// TESTS
// ============================================================================
