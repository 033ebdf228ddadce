//! Reminders page.

use schema::{Reminder, ReminderDraft, ReminderPatch};

use crate::{ApiClient, ClientError, CollectionCache};

/// Reminders view. `notified` is only ever flipped from here; nothing on the
/// server delivers notifications.
#[derive(Debug)]
pub struct RemindersPage {
    client: ApiClient,
    cache: CollectionCache<Reminder>,
}

impl RemindersPage {
    /// Creates the page against an API client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: CollectionCache::new(),
        }
    }

    /// Returns the reminder collection, fetching it when the cache is stale.
    pub async fn reminders(&mut self) -> Result<&[Reminder], ClientError> {
        if self.cache.is_stale() {
            let fetched = self.client.list_reminders().await?;
            self.cache.fill(fetched);
        }
        Ok(self.cache.records())
    }

    /// Creates a reminder and invalidates the cached collection.
    pub async fn create(&mut self, draft: ReminderDraft) -> Result<Reminder, ClientError> {
        let reminder = self.client.create_reminder(&draft).await?;
        self.cache.invalidate();
        Ok(reminder)
    }

    /// Applies a partial update and invalidates the cached collection.
    pub async fn update(&mut self, id: i64, patch: ReminderPatch) -> Result<Reminder, ClientError> {
        let reminder = self.client.update_reminder(id, &patch).await?;
        self.cache.invalidate();
        Ok(reminder)
    }

    /// Marks a reminder as delivered.
    pub async fn mark_notified(&mut self, id: i64) -> Result<Reminder, ClientError> {
        self.update(
            id,
            ReminderPatch {
                notified: Some(true),
                ..Default::default()
            },
        )
        .await
    }
}
