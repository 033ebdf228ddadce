//! Task API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use record_store::RecordStore;
use schema::{Task, TaskDraft, TaskPatch};

use crate::error::ServerResult;
use crate::state::AppState;

/// Lists all tasks.
pub async fn list_tasks<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks().await?;
    Ok(Json(tasks))
}

/// Creates a task from a validated insert payload.
pub async fn create_task<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<TaskDraft>,
) -> ServerResult<Json<Task>> {
    let new = draft.validate()?;
    let task = state.store.create_task(new).await?;

    tracing::info!(task_id = task.id, "Task created");

    Ok(Json(task))
}

/// Applies a partial update to a task.
pub async fn update_task<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(patch): Json<TaskPatch>,
) -> ServerResult<Json<Task>> {
    let changes = patch.validate()?;
    let task = state.store.update_task(id, changes).await?;
    Ok(Json(task))
}

/// Deletes a task. Deleting an absent id is a no-op.
pub async fn delete_task<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    state.store.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
