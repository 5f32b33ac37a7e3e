//! Chat HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/chat/get_chat_messages - Get a conversation by userId and quizId
//! - POST /api/chat/add_message       - Append a student message

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::http::dto::{ChatMessageDto, MessagesResponse, SingleMessageResponse};
use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for conversation retrieval.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryQuery {
    pub user_id: i64,
    pub quiz_id: i64,
}

/// Request body for appending a student message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChatMessageRequest {
    pub user_id: i64,
    pub quiz_id: i64,
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// GET /api/chat/get_chat_messages - Get a conversation in insertion order.
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Query(query): Query<ChatHistoryQuery>,
) -> Result<Json<MessagesResponse>, AppError> {
    let entries = state
        .chat_service
        .get_messages(query.user_id, query.quiz_id)
        .await?;

    Ok(Json(MessagesResponse {
        messages: entries.into_iter().map(ChatMessageDto::from).collect(),
    }))
}

/// POST /api/chat/add_message - Append a student message to a conversation.
pub async fn add_message(
    State(state): State<AppState>,
    Json(request): Json<AddChatMessageRequest>,
) -> Result<Json<SingleMessageResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let entry = state
        .chat_service
        .add_student_message(
            request.user_id,
            request.quiz_id,
            &request.message,
            request.context,
        )
        .await?;

    Ok(Json(SingleMessageResponse {
        message: entry.into(),
    }))
}
