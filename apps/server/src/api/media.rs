//! Media file API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use record_store::{MediaFileFilter, RecordStore};
use schema::{MediaFile, MediaFileDraft};
use serde::Deserialize;

use crate::error::ServerResult;
use crate::state::AppState;

/// Query parameters for listing media files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    pub folder_id: Option<i64>,
}

/// Lists media files, optionally restricted to one folder.
pub async fn list_media_files<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<MediaQuery>,
) -> ServerResult<Json<Vec<MediaFile>>> {
    let files = state
        .store
        .list_media_files(MediaFileFilter {
            folder_id: query.folder_id,
        })
        .await?;
    Ok(Json(files))
}

/// Creates a media file entry from a validated insert payload.
pub async fn create_media_file<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<MediaFileDraft>,
) -> ServerResult<Json<MediaFile>> {
    let new = draft.validate()?;
    let file = state.store.create_media_file(new).await?;

    tracing::info!(media_file_id = file.id, "Media file created");

    Ok(Json(file))
}

/// Deletes a media file entry. Deleting an absent id is a no-op.
pub async fn delete_media_file<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    state.store.delete_media_file(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
