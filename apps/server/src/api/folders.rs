//! Folder API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use record_store::RecordStore;
use schema::{Folder, FolderDraft};

use crate::error::ServerResult;
use crate::state::AppState;

/// Lists all folders.
pub async fn list_folders<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Folder>>> {
    let folders = state.store.list_folders().await?;
    Ok(Json(folders))
}

/// Creates a folder from a validated insert payload. The parent reference is
/// not checked.
pub async fn create_folder<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<FolderDraft>,
) -> ServerResult<Json<Folder>> {
    let new = draft.validate()?;
    let folder = state.store.create_folder(new).await?;

    tracing::info!(folder_id = folder.id, "Folder created");

    Ok(Json(folder))
}

/// Deletes a folder. Media files referencing it are left in place; deleting
/// an absent id is a no-op.
pub async fn delete_folder<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    state.store.delete_folder(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
