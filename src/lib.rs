pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod types;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use crate::database::DatabaseManager;
use crate::handlers::invalid_method;
pub use crate::state::AppState;

/// Router with trailing slashes trimmed before routing, so `/users/` reaches `/users`.
pub fn service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state))
}

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        .merge(subreddit_routes())
        .merge(whitelist_routes())
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn user_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route(
            "/users",
            get(users::collection_get)
                .post(users::collection_post)
                .fallback(invalid_method),
        )
        .route(
            "/users/:username",
            get(users::record_get)
                .put(users::record_put)
                .delete(users::record_delete)
                .fallback(invalid_method),
        )
}

fn subreddit_routes() -> Router<AppState> {
    use handlers::subreddits;

    Router::new()
        .route(
            "/subreddits",
            get(subreddits::collection_get).fallback(invalid_method),
        )
        .route(
            "/subreddits/:name",
            get(subreddits::record_get).fallback(invalid_method),
        )
}

fn whitelist_routes() -> Router<AppState> {
    use handlers::whitelist::{subreddit, user, usersubreddit};

    Router::new()
        .route(
            "/whitelist/subreddit",
            get(subreddit::collection_get)
                .post(subreddit::collection_post)
                .fallback(invalid_method),
        )
        .route(
            "/whitelist/subreddit/:name",
            get(subreddit::record_get)
                .delete(subreddit::record_delete)
                .fallback(invalid_method),
        )
        .route(
            "/whitelist/user",
            get(user::collection_get)
                .post(user::collection_post)
                .fallback(invalid_method),
        )
        .route(
            "/whitelist/user/:username",
            get(user::record_get)
                .delete(user::record_delete)
                .fallback(invalid_method),
        )
        .route(
            "/whitelist/usersubreddit",
            get(usersubreddit::collection_get)
                .post(usersubreddit::collection_post)
                .fallback(invalid_method),
        )
        .route(
            "/whitelist/usersubreddit/:username",
            get(usersubreddit::record_get)
                .put(usersubreddit::record_put)
                .delete(usersubreddit::record_delete)
                .fallback(invalid_method),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "status": "success",
        "data": {
            "name": "Found API",
            "version": version,
            "description": "Per-user found submissions with subreddit and user whitelists",
            "endpoints": {
                "users": "/users[/:username] (GET public; POST/PUT/DELETE require password)",
                "subreddits": "/subreddits[/:name] (GET public)",
                "whitelist_subreddit": "/whitelist/subreddit[/:name]",
                "whitelist_user": "/whitelist/user[/:username]",
                "whitelist_usersubreddit": "/whitelist/usersubreddit[/:username]",
                "health": "/health",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = api::format::timestamp();

    match DatabaseManager::health_check(state.store.pool()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
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
                    "status": "error",
                    "message": "database unavailable",
                    "data": {
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}
