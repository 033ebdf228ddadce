//! Record store trait definitions.

use async_trait::async_trait;
use schema::{
    Folder, MediaFile, NewFolder, NewMediaFile, NewReminder, NewTask, Reminder, ReminderChanges,
    Task, TaskChanges,
};

use crate::StoreResult;

/// Filter options for listing media files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFileFilter {
    /// Restrict to files in this folder.
    pub folder_id: Option<i64>,
}

/// Trait for record storage operations.
///
/// Every backend assigns ids itself on create; ids are unique per entity
/// kind and never reused, even after a delete. Updates merge only the
/// supplied fields and fail with [`crate::StoreError::NotFound`] when the
/// target id is absent; deletes of an absent id succeed silently.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // =========================================================================
    // Task operations
    // =========================================================================

    /// Lists all tasks.
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Gets a task by id.
    async fn get_task(&self, id: i64) -> StoreResult<Option<Task>>;

    /// Creates a new task.
    async fn create_task(&self, new: NewTask) -> StoreResult<Task>;

    /// Applies a partial update to a task.
    async fn update_task(&self, id: i64, changes: TaskChanges) -> StoreResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Media file operations
    // =========================================================================

    /// Lists media files, optionally restricted to one folder.
    async fn list_media_files(&self, filter: MediaFileFilter) -> StoreResult<Vec<MediaFile>>;

    /// Gets a media file by id.
    async fn get_media_file(&self, id: i64) -> StoreResult<Option<MediaFile>>;

    /// Creates a new media file entry.
    async fn create_media_file(&self, new: NewMediaFile) -> StoreResult<MediaFile>;

    /// Deletes a media file entry.
    async fn delete_media_file(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Folder operations
    // =========================================================================

    /// Lists all folders.
    async fn list_folders(&self) -> StoreResult<Vec<Folder>>;

    /// Gets a folder by id.
    async fn get_folder(&self, id: i64) -> StoreResult<Option<Folder>>;

    /// Creates a new folder.
    async fn create_folder(&self, new: NewFolder) -> StoreResult<Folder>;

    /// Deletes a folder. Records referencing it are left in place.
    async fn delete_folder(&self, id: i64) -> StoreResult<()>;

    // =========================================================================
    // Reminder operations
    // =========================================================================

    /// Lists all reminders.
    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>>;

    /// Gets a reminder by id.
    async fn get_reminder(&self, id: i64) -> StoreResult<Option<Reminder>>;

    /// Creates a new reminder. The task reference is not checked.
    async fn create_reminder(&self, new: NewReminder) -> StoreResult<Reminder>;

    /// Applies a partial update to a reminder.
    async fn update_reminder(&self, id: i64, changes: ReminderChanges) -> StoreResult<Reminder>;
}
