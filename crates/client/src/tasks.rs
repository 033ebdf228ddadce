//! Tasks page: collection cache and due-date display grouping.

use chrono::{NaiveDate, Weekday};
use schema::{Task, TaskDraft, TaskPatch};

use crate::{ApiClient, ClientError, CollectionCache};

/// Tasks bucketed by due date for display. The grouping has no server-side
/// equivalent and never changes stored data.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskGroups {
    pub today: Vec<Task>,
    pub tomorrow: Vec<Task>,
    pub this_week: Vec<Task>,
    /// Everything outside the current calendar week, sorted by due date.
    pub upcoming: Vec<Task>,
    pub no_due_date: Vec<Task>,
}

/// Buckets tasks by due date relative to a caller-supplied `today`.
///
/// Weeks start on Sunday. A due date that is not today, tomorrow, or inside
/// the current calendar week lands in the upcoming bucket, past dates
/// included; the upcoming bucket is sorted by due date ascending.
pub fn group_by_due_date(tasks: &[Task], today: NaiveDate) -> TaskGroups {
    let mut groups = TaskGroups::default();
    let tomorrow = today.succ_opt();
    let week = today.week(Weekday::Sun);

    for task in tasks {
        match task.due_date {
            None => groups.no_due_date.push(task.clone()),
            Some(due) => {
                let date = due.date_naive();
                if date == today {
                    groups.today.push(task.clone());
                } else if Some(date) == tomorrow {
                    groups.tomorrow.push(task.clone());
                } else if week.first_day() <= date && date <= week.last_day() {
                    groups.this_week.push(task.clone());
                } else {
                    groups.upcoming.push(task.clone());
                }
            }
        }
    }

    groups.upcoming.sort_by_key(|t| t.due_date);
    groups
}

/// Tasks view: fetches the collection lazily and invalidates its cache after
/// every successful mutation.
#[derive(Debug)]
pub struct TasksPage {
    client: ApiClient,
    cache: CollectionCache<Task>,
}

impl TasksPage {
    /// Creates the page against an API client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: CollectionCache::new(),
        }
    }

    /// Returns the task collection, fetching it when the cache is stale.
    pub async fn tasks(&mut self) -> Result<&[Task], ClientError> {
        if self.cache.is_stale() {
            let fetched = self.client.list_tasks().await?;
            self.cache.fill(fetched);
        }
        Ok(self.cache.records())
    }

    /// Returns the task collection bucketed by due date for `today`.
    pub async fn grouped(&mut self, today: NaiveDate) -> Result<TaskGroups, ClientError> {
        self.tasks().await?;
        Ok(group_by_due_date(self.cache.records(), today))
    }

    /// Creates a task and invalidates the cached collection.
    pub async fn create(&mut self, draft: TaskDraft) -> Result<Task, ClientError> {
        let task = self.client.create_task(&draft).await?;
        self.cache.invalidate();
        Ok(task)
    }

    /// Applies a partial update and invalidates the cached collection.
    pub async fn update(&mut self, id: i64, patch: TaskPatch) -> Result<Task, ClientError> {
        let task = self.client.update_task(id, &patch).await?;
        self.cache.invalidate();
        Ok(task)
    }

    /// Deletes a task and invalidates the cached collection.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_task(id).await?;
        self.cache.invalidate();
        Ok(())
    }
}
