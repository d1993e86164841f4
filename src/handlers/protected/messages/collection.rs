use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Message, MessageInput};
use crate::state::AppState;

use super::message_location;

/// GET /api/messages - List every message
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Message>> {
    let messages = state.messages.list().await?;
    Ok(ApiResponse::success(messages))
}

/// POST /api/messages - Create a message owned by the caller
///
/// The client picks the id; reusing an existing id is a 409.
/// Responds 201 with the stored message and a Location header.
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<MessageInput>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(input) = payload?;

    let message = state.messages.create(user.user_id, input).await?;
    let location = message_location(message.id);
    Ok(ApiResponse::created_at(message, location))
}
