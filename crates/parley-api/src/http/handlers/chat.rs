//! Chat collection HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/chats - List all chats with message stats
//! - POST   /api/chats - Create a chat (optional title)
//! - DELETE /api/chats - Clear all chats and messages

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use parley_types::chat::{Chat, ChatSummary};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for chat creation. The whole body is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Response body for the bulk clear.
#[derive(Debug, Serialize)]
pub struct ClearChatsResponse {
    pub cleared: bool,
    pub chats_removed: u64,
}

/// GET /api/chats - List all chats in creation order.
pub async fn list_chats(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSummary>>, AppError> {
    let chats = state.chat_service.list_chats().await?;
    Ok(Json(chats))
}

/// POST /api/chats - Create a chat. A missing body or title falls back
/// to the default title.
pub async fn create_chat(
    State(state): State<AppState>,
    body: Option<Json<CreateChatRequest>>,
) -> Result<Json<Chat>, AppError> {
    let title = body.and_then(|Json(req)| req.title);
    let chat = state.chat_service.create_chat(title).await?;
    Ok(Json(chat))
}

/// DELETE /api/chats - Clear all chats and messages. Idempotent.
pub async fn clear_chats(
    State(state): State<AppState>,
) -> Result<Json<ClearChatsResponse>, AppError> {
    let chats_removed = state.chat_service.clear_all().await?;
    Ok(Json(ClearChatsResponse {
        cleared: true,
        chats_removed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_chat_request_allows_empty_body() {
        let req: CreateChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());

        let req: CreateChatRequest = serde_json::from_str(r#"{"title":"Symptoms"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Symptoms"));
    }

    #[test]
    fn test_clear_chats_response_shape() {
        let resp = ClearChatsResponse {
            cleared: true,
            chats_removed: 3,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"cleared\":true"));
        assert!(json.contains("\"chats_removed\":3"));
    }
}
