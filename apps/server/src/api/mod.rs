//! API endpoints.

pub mod folders;
pub mod media;
pub mod reminders;
pub mod tasks;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch},
    Router,
};
use record_store::RecordStore;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: RecordStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Task endpoints
        .route(
            "/api/tasks",
            get(tasks::list_tasks::<S>).post(tasks::create_task::<S>),
        )
        .route(
            "/api/tasks/{id}",
            patch(tasks::update_task::<S>).delete(tasks::delete_task::<S>),
        )
        // Media file endpoints
        .route(
            "/api/media",
            get(media::list_media_files::<S>).post(media::create_media_file::<S>),
        )
        .route("/api/media/{id}", delete(media::delete_media_file::<S>))
        // Folder endpoints
        .route(
            "/api/folders",
            get(folders::list_folders::<S>).post(folders::create_folder::<S>),
        )
        .route("/api/folders/{id}", delete(folders::delete_folder::<S>))
        // Reminder endpoints
        .route(
            "/api/reminders",
            get(reminders::list_reminders::<S>).post(reminders::create_reminder::<S>),
        )
        .route(
            "/api/reminders/{id}",
            patch(reminders::update_reminder::<S>),
        )
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use record_store::MemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{Config, StoreBackend};
    use crate::{create_app, create_state};

    fn test_app() -> axum::Router {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            backend: StoreBackend::Memory,
            database_url: String::new(),
            log_level: "info".to_string(),
        };
        create_app(create_state(config, MemoryStore::new()))
    }

    async fn send(
        app: &axum::Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_task_create_delete_scenario() {
        let app = test_app();

        let (status, task) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "Buy milk", "priority": "high"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(task["id"], 1);
        assert_eq!(task["title"], "Buy milk");
        assert_eq!(task["priority"], "high");
        assert_eq!(task["completed"], false);
        assert_eq!(task["dueDate"], Value::Null);

        let (status, body) = send(&app, Method::DELETE, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        // Deleting again is still a 204.
        let (status, _) = send(&app, Method::DELETE, "/api/tasks/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_task_validation_failure_names_field() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "t", "dueDate": "soonish"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_failed");
        assert_eq!(body["error"]["fields"][0]["field"], "dueDate");
    }

    #[tokio::test]
    async fn test_task_patch_merges_partial_fields() {
        let app = test_app();

        let (_, task) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "Water plants", "description": "the ferns"})),
        )
        .await;

        let (status, updated) = send(
            &app,
            Method::PATCH,
            &format!("/api/tasks/{}", task["id"]),
            Some(json!({"completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], "Water plants");
        assert_eq!(updated["description"], "the ferns");
    }

    #[tokio::test]
    async fn test_task_patch_missing_id_is_404() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/tasks/42",
            Some(json!({"completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "resource_not_found");
    }

    #[tokio::test]
    async fn test_media_folder_filter() {
        let app = test_app();

        let (status, folder) = send(
            &app,
            Method::POST,
            "/api/folders",
            Some(json!({"name": "Photos"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for (name, folder_id) in [("in.png", Some(folder["id"].clone())), ("out.png", None)] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/media",
                Some(json!({
                    "filename": name,
                    "filePath": format!("https://blobs.example/{name}"),
                    "fileType": "image/png",
                    "folderId": folder_id,
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, all) = send(&app, Method::GET, "/api/media", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let uri = format!("/api/media?folderId={}", folder["id"]);
        let (_, filtered) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(filtered.as_array().unwrap().len(), 1);
        assert_eq!(filtered[0]["filename"], "in.png");
    }

    #[tokio::test]
    async fn test_reminder_accepts_dangling_task_reference() {
        let app = test_app();

        let (_, task) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "gone soon"})),
        )
        .await;
        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/api/tasks/{}", task["id"]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, reminder) = send(
            &app,
            Method::POST,
            "/api/reminders",
            Some(json!({"taskId": task["id"], "reminderTime": "2024-01-01T10:00:00Z"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reminder["taskId"], task["id"]);
        assert_eq!(reminder["notified"], false);

        let (status, updated) = send(
            &app,
            Method::PATCH,
            &format!("/api/reminders/{}", reminder["id"]),
            Some(json!({"notified": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["notified"], true);
    }

    #[tokio::test]
    async fn test_unknown_payload_field_is_rejected() {
        let app = test_app();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/folders",
            Some(json!({"name": "Photos", "color": "blue"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
