//! Typed HTTP client for the Daypack server.

use schema::{
    Folder, FolderDraft, MediaFile, MediaFileDraft, Reminder, ReminderDraft, ReminderPatch, Task,
    TaskDraft, TaskPatch,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ClientError;

/// Shape of the server's JSON error envelope.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Daypack REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Server URL
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Creates a new API client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turns a response into the decoded body, mapping non-2xx statuses to
    /// [`ClientError::Api`] with the server's error message when present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => envelope.error.message,
                Err(_) => text,
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Deserialization(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path = %path, "GET");
        let response = self
            .http_client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!(path = %path, "POST");
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    async fn patch_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!(path = %path, "PATCH");
        let response = self
            .http_client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::decode(response).await
    }

    /// Deletes expect a 204 with an empty body.
    async fn delete_empty(&self, path: &str) -> Result<(), ClientError> {
        debug!(path = %path, "DELETE");
        let response = self
            .http_client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    // =========================================================================
    // Task routes
    // =========================================================================

    /// Fetches all tasks.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.get_json("/api/tasks").await
    }

    /// Creates a task.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ClientError> {
        self.post_json("/api/tasks", draft).await
    }

    /// Applies a partial update to a task.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ClientError> {
        self.patch_json(&format!("/api/tasks/{id}"), patch).await
    }

    /// Deletes a task.
    pub async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/tasks/{id}")).await
    }

    // =========================================================================
    // Media file routes
    // =========================================================================

    /// Fetches media files, optionally restricted to one folder.
    pub async fn list_media_files(
        &self,
        folder_id: Option<i64>,
    ) -> Result<Vec<MediaFile>, ClientError> {
        let path = match folder_id {
            Some(id) => format!("/api/media?folderId={id}"),
            None => "/api/media".to_string(),
        };
        self.get_json(&path).await
    }

    /// Creates a media file entry.
    pub async fn create_media_file(
        &self,
        draft: &MediaFileDraft,
    ) -> Result<MediaFile, ClientError> {
        self.post_json("/api/media", draft).await
    }

    /// Deletes a media file entry.
    pub async fn delete_media_file(&self, id: i64) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/media/{id}")).await
    }

    // =========================================================================
    // Folder routes
    // =========================================================================

    /// Fetches all folders.
    pub async fn list_folders(&self) -> Result<Vec<Folder>, ClientError> {
        self.get_json("/api/folders").await
    }

    /// Creates a folder.
    pub async fn create_folder(&self, draft: &FolderDraft) -> Result<Folder, ClientError> {
        self.post_json("/api/folders", draft).await
    }

    /// Deletes a folder.
    pub async fn delete_folder(&self, id: i64) -> Result<(), ClientError> {
        self.delete_empty(&format!("/api/folders/{id}")).await
    }

    // =========================================================================
    // Reminder routes
    // =========================================================================

    /// Fetches all reminders.
    pub async fn list_reminders(&self) -> Result<Vec<Reminder>, ClientError> {
        self.get_json("/api/reminders").await
    }

    /// Creates a reminder.
    pub async fn create_reminder(&self, draft: &ReminderDraft) -> Result<Reminder, ClientError> {
        self.post_json("/api/reminders", draft).await
    }

    /// Applies a partial update to a reminder.
    pub async fn update_reminder(
        &self,
        id: i64,
        patch: &ReminderPatch,
    ) -> Result<Reminder, ClientError> {
        self.patch_json(&format!("/api/reminders/{id}"), patch).await
    }

    /// Checks server health.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .http_client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Api {
                status: response.status().as_u16(),
                message: format!("Health check failed with status {}", response.status()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:5871/");
        assert_eq!(client.base_url, "http://localhost:5871");
        assert_eq!(client.url("/api/tasks"), "http://localhost:5871/api/tasks");
    }
}
