pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;

/// Build the full HTTP application
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(message_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new().route("/api/login", post(auth::login_post))
}

fn message_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::messages;

    Router::new()
        // Collection
        .route(
            "/api/messages",
            get(messages::messages_get).post(messages::messages_post),
        )
        // Individual message
        .route(
            "/api/messages/:id",
            get(messages::message_get)
                .put(messages::message_put)
                .delete(messages::message_delete),
        )
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() || config.security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Message Board API",
            "version": version,
            "description": "Message board with token authentication and owner-scoped messages",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "POST /api/login (public - token acquisition)",
                "messages": "/api/messages[/:id] (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.messages.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
