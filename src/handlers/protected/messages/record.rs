use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    Json,
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::{Message, MessageInput};
use crate::state::AppState;

/// GET /api/messages/:id - Get a single message by id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Message> {
    let id = message_id(id)?;
    let message = state.messages.get(id).await?;
    Ok(ApiResponse::success(message))
}

/// PUT /api/messages/:id - Replace title and text of a message the caller owns
///
/// Responds 204 with no body.
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MessageInput>, JsonRejection>,
) -> ApiResult<()> {
    let id = message_id(id)?;
    let Json(input) = payload?;

    state.messages.update(user.user_id, id, input).await?;
    Ok(ApiResponse::<()>::no_content())
}

/// DELETE /api/messages/:id - Remove a message the caller owns, returning it
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Message> {
    let id = message_id(id)?;
    let removed = state.messages.delete(user.user_id, id).await?;
    Ok(ApiResponse::success(removed))
}

fn message_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = id?;
    Ok(id)
}
