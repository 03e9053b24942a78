use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::dispatch::Reply;
use crate::error::ApiError;
use crate::state::AppState;

/// An inbound chat message as forwarded by a transport adapter.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat_id: String,
    #[serde(default)]
    pub text: Option<String>,
}

pub async fn post_message(
    State(state): State<AppState>,
    Json(message): Json<IncomingMessage>,
) -> Result<Json<Reply>, ApiError> {
    if message.chat_id.trim().is_empty() {
        return Err(ApiError::BadRequest("chat_id must not be empty".to_string()));
    }
    let text = message
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("message has no text".to_string()))?;

    Ok(Json(state.dispatcher.handle(&message.chat_id, text).await))
}
