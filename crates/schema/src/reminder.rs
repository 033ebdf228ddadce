//! Reminder records and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;
use crate::{parse_instant, ValidationError};

/// A reminder, optionally attached to a task.
///
/// `notified` is a passive flag read by clients; nothing in this system
/// delivers notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// Referenced task, if any. The reference is not checked against the
    /// tasks collection and may dangle.
    pub task_id: Option<i64>,
    /// When the reminder is due.
    pub reminder_time: DateTime<Utc>,
    /// Whether a client has marked the reminder as delivered.
    pub notified: bool,
}

/// Raw reminder insert payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReminderDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified: Option<bool>,
}

/// Normalized reminder insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub task_id: Option<i64>,
    pub reminder_time: DateTime<Utc>,
    pub notified: bool,
}

impl ReminderDraft {
    /// Checks the draft and produces the normalized insert payload.
    pub fn validate(self) -> Result<NewReminder, ValidationError> {
        let mut errors = FieldErrors::default();

        let reminder_time = match self.reminder_time.as_deref() {
            Some(raw) => match parse_instant(raw) {
                Some(instant) => instant,
                None => {
                    errors.push("reminderTime", format!("is not a valid date: {raw:?}"));
                    DateTime::<Utc>::UNIX_EPOCH
                }
            },
            None => {
                errors.push("reminderTime", "is required");
                DateTime::<Utc>::UNIX_EPOCH
            }
        };

        errors.finish(NewReminder {
            task_id: self.task_id,
            reminder_time,
            notified: self.notified.unwrap_or(false),
        })
    }
}

/// Raw reminder partial-update payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReminderPatch {
    #[serde(
        default,
        deserialize_with = "crate::de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub task_id: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified: Option<bool>,
}

/// Normalized reminder field changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderChanges {
    pub task_id: Option<Option<i64>>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub notified: Option<bool>,
}

impl ReminderPatch {
    /// Checks the patch and produces the normalized change set.
    pub fn validate(self) -> Result<ReminderChanges, ValidationError> {
        let mut errors = FieldErrors::default();

        let reminder_time = match self.reminder_time.as_deref() {
            Some(raw) => match parse_instant(raw) {
                Some(instant) => Some(instant),
                None => {
                    errors.push("reminderTime", format!("is not a valid date: {raw:?}"));
                    None
                }
            },
            None => None,
        };

        errors.finish(ReminderChanges {
            task_id: self.task_id,
            reminder_time,
            notified: self.notified,
        })
    }
}

impl ReminderChanges {
    /// Merges the changes into an existing record. Absent fields are left
    /// untouched.
    pub fn apply(self, reminder: &mut Reminder) {
        if let Some(task_id) = self.task_id {
            reminder.task_id = task_id;
        }
        if let Some(reminder_time) = self.reminder_time {
            reminder.reminder_time = reminder_time;
        }
        if let Some(notified) = self.notified {
            reminder.notified = notified;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_reminder_time() {
        let draft: ReminderDraft = serde_json::from_value(serde_json::json!({"taskId": 1})).unwrap();
        assert_eq!(draft.validate().unwrap_err().errors[0].field, "reminderTime");
    }

    #[test]
    fn draft_coerces_time_and_defaults_notified() {
        let draft: ReminderDraft = serde_json::from_value(serde_json::json!({
            "taskId": 1,
            "reminderTime": "2024-01-01T10:00:00Z",
        }))
        .unwrap();
        let new = draft.validate().unwrap();
        assert_eq!(new.task_id, Some(1));
        assert!(!new.notified);
        assert_eq!(new.reminder_time.to_rfc3339(), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn patch_marks_notified_only() {
        let patch: ReminderPatch =
            serde_json::from_value(serde_json::json!({"notified": true})).unwrap();
        let changes = patch.validate().unwrap();
        assert_eq!(changes.notified, Some(true));
        assert_eq!(changes.task_id, None);
        assert_eq!(changes.reminder_time, None);
    }

    #[test]
    fn patch_clears_task_reference_with_null() {
        let patch: ReminderPatch =
            serde_json::from_value(serde_json::json!({"taskId": null})).unwrap();
        let changes = patch.validate().unwrap();
        assert_eq!(changes.task_id, Some(None));

        let mut reminder = Reminder {
            id: 1,
            task_id: Some(9),
            reminder_time: DateTime::<Utc>::UNIX_EPOCH,
            notified: false,
        };
        changes.apply(&mut reminder);
        assert_eq!(reminder.task_id, None);
    }
}
