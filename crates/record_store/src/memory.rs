//! In-memory record store implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use schema::{
    Folder, MediaFile, NewFolder, NewMediaFile, NewReminder, NewTask, Reminder, ReminderChanges,
    Task, TaskChanges,
};
use tokio::sync::RwLock;

use crate::{MediaFileFilter, RecordStore, StoreError, StoreResult};

/// One monotonic id counter per entity kind, starting at 1. Ids are never
/// reused, even after a delete.
#[derive(Debug)]
struct IdCounters {
    task: AtomicI64,
    media_file: AtomicI64,
    folder: AtomicI64,
    reminder: AtomicI64,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            task: AtomicI64::new(1),
            media_file: AtomicI64::new(1),
            folder: AtomicI64::new(1),
            reminder: AtomicI64::new(1),
        }
    }
}

/// In-memory record store. Data does not survive a process restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<HashMap<i64, Task>>,
    media_files: RwLock<HashMap<i64, MediaFile>>,
    folders: RwLock<HashMap<i64, Folder>>,
    reminders: RwLock<HashMap<i64, Reminder>>,
    ids: IdCounters,
}

impl MemoryStore {
    /// Creates a new in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_id<T>(records: impl Iterator<Item = T>, id: impl Fn(&T) -> i64) -> Vec<T> {
    let mut result: Vec<T> = records.collect();
    result.sort_by_key(id);
    result
}

#[async_trait]
impl RecordStore for MemoryStore {
    // =========================================================================
    // Task operations
    // =========================================================================

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(sorted_by_id(tasks.values().cloned(), |t| t.id))
    }

    async fn get_task(&self, id: i64) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn create_task(&self, new: NewTask) -> StoreResult<Task> {
        let id = self.ids.task.fetch_add(1, Ordering::SeqCst);
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            priority: new.priority,
            completed: new.completed,
        };
        let mut tasks = self.tasks.write().await;
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, changes: TaskChanges) -> StoreResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Task", id))?;
        changes.apply(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks.remove(&id);
        Ok(())
    }

    // =========================================================================
    // Media file operations
    // =========================================================================

    async fn list_media_files(&self, filter: MediaFileFilter) -> StoreResult<Vec<MediaFile>> {
        let files = self.media_files.read().await;
        let matching = files
            .values()
            .filter(|f| match filter.folder_id {
                Some(folder_id) => f.folder_id == Some(folder_id),
                None => true,
            })
            .cloned();
        Ok(sorted_by_id(matching, |f| f.id))
    }

    async fn get_media_file(&self, id: i64) -> StoreResult<Option<MediaFile>> {
        let files = self.media_files.read().await;
        Ok(files.get(&id).cloned())
    }

    async fn create_media_file(&self, new: NewMediaFile) -> StoreResult<MediaFile> {
        let id = self.ids.media_file.fetch_add(1, Ordering::SeqCst);
        let file = MediaFile {
            id,
            filename: new.filename,
            file_path: new.file_path,
            file_type: new.file_type,
            folder_id: new.folder_id,
        };
        let mut files = self.media_files.write().await;
        files.insert(id, file.clone());
        Ok(file)
    }

    async fn delete_media_file(&self, id: i64) -> StoreResult<()> {
        let mut files = self.media_files.write().await;
        files.remove(&id);
        Ok(())
    }

    // =========================================================================
    // Folder operations
    // =========================================================================

    async fn list_folders(&self) -> StoreResult<Vec<Folder>> {
        let folders = self.folders.read().await;
        Ok(sorted_by_id(folders.values().cloned(), |f| f.id))
    }

    async fn get_folder(&self, id: i64) -> StoreResult<Option<Folder>> {
        let folders = self.folders.read().await;
        Ok(folders.get(&id).cloned())
    }

    async fn create_folder(&self, new: NewFolder) -> StoreResult<Folder> {
        let id = self.ids.folder.fetch_add(1, Ordering::SeqCst);
        let folder = Folder {
            id,
            name: new.name,
            parent_id: new.parent_id,
        };
        let mut folders = self.folders.write().await;
        folders.insert(id, folder.clone());
        Ok(folder)
    }

    async fn delete_folder(&self, id: i64) -> StoreResult<()> {
        let mut folders = self.folders.write().await;
        folders.remove(&id);
        Ok(())
    }

    // =========================================================================
    // Reminder operations
    // =========================================================================

    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>> {
        let reminders = self.reminders.read().await;
        Ok(sorted_by_id(reminders.values().cloned(), |r| r.id))
    }

    async fn get_reminder(&self, id: i64) -> StoreResult<Option<Reminder>> {
        let reminders = self.reminders.read().await;
        Ok(reminders.get(&id).cloned())
    }

    async fn create_reminder(&self, new: NewReminder) -> StoreResult<Reminder> {
        let id = self.ids.reminder.fetch_add(1, Ordering::SeqCst);
        let reminder = Reminder {
            id,
            task_id: new.task_id,
            reminder_time: new.reminder_time,
            notified: new.notified,
        };
        let mut reminders = self.reminders.write().await;
        reminders.insert(id, reminder.clone());
        Ok(reminder)
    }

    async fn update_reminder(&self, id: i64, changes: ReminderChanges) -> StoreResult<Reminder> {
        let mut reminders = self.reminders.write().await;
        let reminder = reminders
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Reminder", id))?;
        changes.apply(reminder);
        Ok(reminder.clone())
    }
}
