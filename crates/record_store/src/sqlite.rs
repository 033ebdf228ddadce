//! SQLite record store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schema::{
    Folder, MediaFile, NewFolder, NewMediaFile, NewReminder, NewTask, Priority, Reminder,
    ReminderChanges, Task, TaskChanges,
};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite};

use crate::{MediaFileFilter, RecordStore, StoreError, StoreResult};

/// SQLite-backed record store.
///
/// Id assignment is delegated to `INTEGER PRIMARY KEY AUTOINCREMENT`, so ids
/// are never reused even after a delete. Timestamps are stored as RFC 3339
/// text.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Opens the database at `url` and applies the schema.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        // A single pooled connection: SQLite has one writer at a time, and an
        // in-memory database exists per connection.
        // Foreign keys are declared in the schema for documentation but not
        // enforced, matching the unchecked references of the in-memory backend.
        // sqlx enables `PRAGMA foreign_keys` by default, so disable it here.
        let options = SqliteConnectOptions::from_str(url)?.foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

fn parse_stored_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Database row for Task.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    priority: String,
    completed: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date.as_deref().and_then(parse_stored_instant),
            priority: Priority::parse(&row.priority).unwrap_or_default(),
            completed: row.completed,
        }
    }
}

/// Database row for MediaFile.
#[derive(Debug, FromRow)]
struct MediaFileRow {
    id: i64,
    filename: String,
    file_path: String,
    file_type: String,
    folder_id: Option<i64>,
}

impl From<MediaFileRow> for MediaFile {
    fn from(row: MediaFileRow) -> Self {
        MediaFile {
            id: row.id,
            filename: row.filename,
            file_path: row.file_path,
            file_type: row.file_type,
            folder_id: row.folder_id,
        }
    }
}

/// Database row for Folder.
#[derive(Debug, FromRow)]
struct FolderRow {
    id: i64,
    name: String,
    parent_id: Option<i64>,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Folder {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
        }
    }
}

/// Database row for Reminder.
#[derive(Debug, FromRow)]
struct ReminderRow {
    id: i64,
    task_id: Option<i64>,
    reminder_time: String,
    notified: bool,
}

impl From<ReminderRow> for Reminder {
    fn from(row: ReminderRow) -> Self {
        Reminder {
            id: row.id,
            task_id: row.task_id,
            reminder_time: parse_stored_instant(&row.reminder_time)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            notified: row.notified,
        }
    }
}

const TASK_COLUMNS: &str = "id, title, description, due_date, priority, completed";
const MEDIA_FILE_COLUMNS: &str = "id, filename, file_path, file_type, folder_id";
const FOLDER_COLUMNS: &str = "id, name, parent_id";
const REMINDER_COLUMNS: &str = "id, task_id, reminder_time, notified";

#[async_trait]
impl RecordStore for SqliteStore {
    // =========================================================================
    // Task operations
    // =========================================================================

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_task(&self, id: i64) -> StoreResult<Option<Task>> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Task::from))
    }

    async fn create_task(&self, new: NewTask) -> StoreResult<Task> {
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, due_date, priority, completed)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.due_date.map(|d| d.to_rfc3339()))
        .bind(new.priority.as_str())
        .bind(new.completed)
        .execute(&self.pool)
        .await?;

        Ok(Task {
            id: result.last_insert_rowid(),
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            priority: new.priority,
            completed: new.completed,
        })
    }

    async fn update_task(&self, id: i64, changes: TaskChanges) -> StoreResult<Task> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        let mut task = Task::from(row.ok_or_else(|| StoreError::not_found("Task", id))?);
        changes.apply(&mut task);

        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, due_date = ?, priority = ?, \
             completed = ? WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date.map(|d| d.to_rfc3339()))
        .bind(task.priority.as_str())
        .bind(task.completed)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Media file operations
    // =========================================================================

    async fn list_media_files(&self, filter: MediaFileFilter) -> StoreResult<Vec<MediaFile>> {
        let rows: Vec<MediaFileRow> = if let Some(folder_id) = filter.folder_id {
            sqlx::query_as(&format!(
                "SELECT {MEDIA_FILE_COLUMNS} FROM media_files WHERE folder_id = ? ORDER BY id"
            ))
            .bind(folder_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "SELECT {MEDIA_FILE_COLUMNS} FROM media_files ORDER BY id"
            ))
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.into_iter().map(MediaFile::from).collect())
    }

    async fn get_media_file(&self, id: i64) -> StoreResult<Option<MediaFile>> {
        let row: Option<MediaFileRow> = sqlx::query_as(&format!(
            "SELECT {MEDIA_FILE_COLUMNS} FROM media_files WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(MediaFile::from))
    }

    async fn create_media_file(&self, new: NewMediaFile) -> StoreResult<MediaFile> {
        let result = sqlx::query(
            "INSERT INTO media_files (filename, file_path, file_type, folder_id)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&new.filename)
        .bind(&new.file_path)
        .bind(&new.file_type)
        .bind(new.folder_id)
        .execute(&self.pool)
        .await?;

        Ok(MediaFile {
            id: result.last_insert_rowid(),
            filename: new.filename,
            file_path: new.file_path,
            file_type: new.file_type,
            folder_id: new.folder_id,
        })
    }

    async fn delete_media_file(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM media_files WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Folder operations
    // =========================================================================

    async fn list_folders(&self) -> StoreResult<Vec<Folder>> {
        let rows: Vec<FolderRow> =
            sqlx::query_as(&format!("SELECT {FOLDER_COLUMNS} FROM folders ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    async fn get_folder(&self, id: i64) -> StoreResult<Option<Folder>> {
        let row: Option<FolderRow> =
            sqlx::query_as(&format!("SELECT {FOLDER_COLUMNS} FROM folders WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Folder::from))
    }

    async fn create_folder(&self, new: NewFolder) -> StoreResult<Folder> {
        let result = sqlx::query("INSERT INTO folders (name, parent_id) VALUES (?, ?)")
            .bind(&new.name)
            .bind(new.parent_id)
            .execute(&self.pool)
            .await?;

        Ok(Folder {
            id: result.last_insert_rowid(),
            name: new.name,
            parent_id: new.parent_id,
        })
    }

    async fn delete_folder(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Reminder operations
    // =========================================================================

    async fn list_reminders(&self) -> StoreResult<Vec<Reminder>> {
        let rows: Vec<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Reminder::from).collect())
    }

    async fn get_reminder(&self, id: i64) -> StoreResult<Option<Reminder>> {
        let row: Option<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Reminder::from))
    }

    async fn create_reminder(&self, new: NewReminder) -> StoreResult<Reminder> {
        let result = sqlx::query(
            "INSERT INTO reminders (task_id, reminder_time, notified) VALUES (?, ?, ?)",
        )
        .bind(new.task_id)
        .bind(new.reminder_time.to_rfc3339())
        .bind(new.notified)
        .execute(&self.pool)
        .await?;

        Ok(Reminder {
            id: result.last_insert_rowid(),
            task_id: new.task_id,
            reminder_time: new.reminder_time,
            notified: new.notified,
        })
    }

    async fn update_reminder(&self, id: i64, changes: ReminderChanges) -> StoreResult<Reminder> {
        let row: Option<ReminderRow> = sqlx::query_as(&format!(
            "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        let mut reminder =
            Reminder::from(row.ok_or_else(|| StoreError::not_found("Reminder", id))?);
        changes.apply(&mut reminder);

        sqlx::query("UPDATE reminders SET task_id = ?, reminder_time = ?, notified = ? WHERE id = ?")
            .bind(reminder.task_id)
            .bind(reminder.reminder_time.to_rfc3339())
            .bind(reminder.notified)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(reminder)
    }
}

/// SQL schema definition. Foreign keys are declared but SQLite does not
/// enforce them without `PRAGMA foreign_keys`, matching the unchecked
/// references of the in-memory backend.
const SCHEMA_SQL: &str = r#"
-- Tasks table
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    due_date TEXT,
    priority TEXT NOT NULL DEFAULT 'medium',
    completed INTEGER NOT NULL DEFAULT 0
);

-- Folders table (self-referential tree)
CREATE TABLE IF NOT EXISTS folders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    parent_id INTEGER REFERENCES folders(id)
);

-- Media files table
CREATE TABLE IF NOT EXISTS media_files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    file_path TEXT NOT NULL,
    file_type TEXT NOT NULL,
    folder_id INTEGER REFERENCES folders(id)
);

-- Reminders table
CREATE TABLE IF NOT EXISTS reminders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER REFERENCES tasks(id),
    reminder_time TEXT NOT NULL,
    notified INTEGER NOT NULL DEFAULT 0
);

-- Indexes for the folder filter
CREATE INDEX IF NOT EXISTS idx_media_files_folder ON media_files(folder_id);
"#;

#[cfg(test)]
mod tests {
    use schema::Priority;

    use super::*;

    async fn open_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.unwrap()
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: Priority::default(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_task_crud() {
        let store = open_store().await;

        let created = store.create_task(new_task("Buy milk")).await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = store.get_task(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = store
            .update_task(
                created.id,
                TaskChanges {
                    title: Some("Buy oat milk".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.priority, Priority::Medium);

        store.delete_task(created.id).await.unwrap();
        assert!(store.get_task(created.id).await.unwrap().is_none());
        // Deleting again stays silent.
        store.delete_task(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_autoincrement_ids_are_never_reused() {
        let store = open_store().await;

        let first = store.create_task(new_task("a")).await.unwrap();
        store.delete_task(first.id).await.unwrap();
        let second = store.create_task(new_task("b")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_due_date_round_trips() {
        let store = open_store().await;

        let due = "2024-06-01T09:30:00+00:00"
            .parse::<DateTime<Utc>>()
            .unwrap();
        let created = store
            .create_task(NewTask {
                due_date: Some(due),
                ..new_task("dated")
            })
            .await
            .unwrap();

        let fetched = store.get_task(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.due_date, Some(due));

        // Clearing via an explicit null change.
        let cleared = store
            .update_task(
                created.id,
                TaskChanges {
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.due_date, None);
    }

    #[tokio::test]
    async fn test_update_missing_reminder_fails() {
        let store = open_store().await;

        let err = store
            .update_reminder(9, ReminderChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Reminder", id: 9 }));
    }

    #[tokio::test]
    async fn test_media_filter_by_folder() {
        let store = open_store().await;

        let folder = store
            .create_folder(NewFolder {
                name: "Photos".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();

        for (name, folder_id) in [("in.png", Some(folder.id)), ("out.png", None)] {
            store
                .create_media_file(NewMediaFile {
                    filename: name.to_string(),
                    file_path: format!("https://blobs.example/{name}"),
                    file_type: "image/png".to_string(),
                    folder_id,
                })
                .await
                .unwrap();
        }

        let filtered = store
            .list_media_files(MediaFileFilter {
                folder_id: Some(folder.id),
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "in.png");

        let all = store
            .list_media_files(MediaFileFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_reminder_may_dangle() {
        let store = open_store().await;

        // tasks table is empty; the reference is not checked.
        let reminder = store
            .create_reminder(NewReminder {
                task_id: Some(1),
                reminder_time: DateTime::<Utc>::UNIX_EPOCH,
                notified: false,
            })
            .await
            .unwrap();
        assert_eq!(reminder.task_id, Some(1));
    }
}
