// handlers/public/auth/login.rs - POST /api/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::auth::{AuthError, AuthenticatedSession};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "username": "john", "password": "secret" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "token_type": "Bearer",
///     "expires_in": 3600,
///     "user": { "id": 1, "username": "john", "first_name": "John", "last_name": "Crichton" }
///   }
/// }
/// ```
///
/// Wrong username and wrong password produce the same 400 response.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthenticatedSession> {
    let Json(request) = payload?;

    match state.auth.authenticate(&request.username, &request.password) {
        Ok(session) => {
            tracing::info!("User '{}' (ID: {}) logged in", session.user.username, session.user.id);
            Ok(ApiResponse::success(session))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Failed login attempt for username '{}'", request.username);
            Err(ApiError::from(AuthError::InvalidCredentials))
        }
        Err(e) => Err(e.into()),
    }
}
