//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/chats/{chat_id}/messages - List messages for a chat
//! - POST /api/chats/{chat_id}/messages - Relay a user message to the AI

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use parley_types::chat::Message;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for posting a message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

/// Response body for a relayed exchange: the user's message and the
/// bot's reply, both as persisted.
#[derive(Debug, Serialize)]
pub struct PostMessageResponse {
    pub user_message: Message,
    pub bot_message: Message,
}

/// GET /api/chats/{chat_id}/messages - List messages, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.chat_service.list_messages(chat_id).await?;
    Ok(Json(messages))
}

/// POST /api/chats/{chat_id}/messages - Persist the user message, relay
/// the conversation to the AI, persist and return the reply.
///
/// A malformed or missing JSON body surfaces as a validation error
/// rather than axum's default rejection.
pub async fn post_message(
    State(state): State<AppState>,
    Path(chat_id): Path<i64>,
    body: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<Json<PostMessageResponse>, AppError> {
    let Json(request) =
        body.map_err(|_| AppError::Validation("Message content is required".to_string()))?;

    let (user_message, bot_message) = state
        .chat_service
        .post_message(chat_id, &request.content)
        .await?;

    Ok(Json(PostMessageResponse {
        user_message,
        bot_message,
    }))
}
