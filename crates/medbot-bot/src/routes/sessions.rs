use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use medbot_session::{SessionError, SessionSummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Cancelled {
    removed: bool,
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    let summary = state
        .dispatcher
        .session_summary(&chat_id)
        .await
        .ok_or(SessionError::SessionNotFound { user_id: chat_id })?;
    Ok(Json(summary))
}

/// Removing an absent session is not an error.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Json<Cancelled> {
    Json(Cancelled {
        removed: state.dispatcher.cancel(&chat_id).await,
    })
}
