//! Reminder API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use record_store::RecordStore;
use schema::{Reminder, ReminderDraft, ReminderPatch};

use crate::error::ServerResult;
use crate::state::AppState;

/// Lists all reminders.
pub async fn list_reminders<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<Vec<Reminder>>> {
    let reminders = state.store.list_reminders().await?;
    Ok(Json(reminders))
}

/// Creates a reminder from a validated insert payload. The task reference is
/// not checked and may dangle.
pub async fn create_reminder<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<ReminderDraft>,
) -> ServerResult<Json<Reminder>> {
    let new = draft.validate()?;
    let reminder = state.store.create_reminder(new).await?;

    tracing::info!(reminder_id = reminder.id, "Reminder created");

    Ok(Json(reminder))
}

/// Applies a partial update to a reminder (typically flipping `notified`).
pub async fn update_reminder<S: RecordStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(patch): Json<ReminderPatch>,
) -> ServerResult<Json<Reminder>> {
    let changes = patch.validate()?;
    let reminder = state.store.update_reminder(id, changes).await?;
    Ok(Json(reminder))
}
