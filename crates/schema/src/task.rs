//! Task records and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::{parse_instant, ValidationError};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Converts the priority to a string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a priority from a storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional due instant.
    pub due_date: Option<DateTime<Utc>>,
    /// Priority, defaults to medium.
    pub priority: Priority,
    /// Whether the task is done.
    pub completed: bool,
}

/// Raw task insert payload as received on the wire.
///
/// `dueDate` is accepted as a date string or null and coerced to an instant
/// during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Normalized task insert payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub completed: bool,
}

impl TaskDraft {
    /// Checks the draft and produces the normalized insert payload.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let mut errors = FieldErrors::default();

        let title = match self.title {
            Some(t) if !t.trim().is_empty() => t,
            Some(_) => {
                errors.push("title", "must not be empty");
                String::new()
            }
            None => {
                errors.push("title", "is required");
                String::new()
            }
        };

        let due_date = match self.due_date.as_deref() {
            Some(raw) => match parse_instant(raw) {
                Some(instant) => Some(instant),
                None => {
                    errors.push("dueDate", format!("is not a valid date: {raw:?}"));
                    None
                }
            },
            None => None,
        };

        errors.finish(NewTask {
            title,
            description: self.description,
            due_date,
            priority: self.priority.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
        })
    }
}

/// Raw task partial-update payload.
///
/// Nullable fields distinguish "absent" (leave untouched) from an explicit
/// `null` (clear the stored value).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Normalized task field changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Checks the patch and produces the normalized change set.
    pub fn validate(self) -> Result<TaskChanges, ValidationError> {
        let mut errors = FieldErrors::default();

        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            errors.push("title", "must not be empty");
        }

        let due_date = match self.due_date {
            Some(Some(raw)) => match parse_instant(&raw) {
                Some(instant) => Some(Some(instant)),
                None => {
                    errors.push("dueDate", format!("is not a valid date: {raw:?}"));
                    None
                }
            },
            Some(None) => Some(None),
            None => None,
        };

        errors.finish(TaskChanges {
            title: self.title,
            description: self.description,
            due_date,
            priority: self.priority,
            completed: self.completed,
        })
    }
}

impl TaskChanges {
    /// Merges the changes into an existing record. Absent fields are left
    /// untouched.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
