//! Route definitions for the TaskHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(task_routes())
        .merge(comment_routes())
        .merge(group_routes())
        .merge(user_routes())
        .merge(record_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Account lifecycle: capture, signup, login, invite, decline.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/capture-email", post(handlers::auth::capture_email))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/invite", post(handlers::auth::invite))
        .route("/auth/decline", post(handlers::auth::decline))
}

/// Folder CRUD, trees, and reordering.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", get(handlers::folder::get_folders))
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/tree", get(handlers::folder::folder_tree))
        .route("/folders/sort", put(handlers::folder::sort_folders))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", put(handlers::folder::update_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/all-tasks", get(handlers::folder::all_tasks))
        .route("/projects", post(handlers::folder::create_project))
}

/// Task CRUD, trees, and reordering.
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::get_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/sort", put(handlers::task::sort_tasks))
        .route("/tasks/{id}", get(handlers::task::get_task))
        .route("/tasks/{id}", put(handlers::task::update_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
        .route("/tasks/{id}/tree", get(handlers::task::task_tree))
}

/// Comments and the activity log.
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(handlers::comment::get_comments))
        .route("/comments", post(handlers::comment::create_comment))
        .route("/comments/{id}", delete(handlers::comment::delete_comment))
        .route("/logs", get(handlers::comment::get_logs))
}

/// Group CRUD and membership.
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", get(handlers::group::get_groups))
        .route("/groups", post(handlers::group::create_group))
        .route("/groups/{id}", get(handlers::group::get_group))
        .route("/groups/{id}", put(handlers::group::update_group))
        .route("/groups/{id}", delete(handlers::group::delete_group))
        .route("/groups/{id}/users", post(handlers::group::add_users))
        .route("/groups/{id}/users", delete(handlers::group::remove_users))
}

/// User profiles.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::get_users))
        .route("/users/me", get(handlers::user::me))
        .route("/users/me", put(handlers::user::update_me))
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Time-tracking records.
fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/records", get(handlers::record::find_records))
        .route("/records", post(handlers::record::create_record))
        .route("/records/{id}", get(handlers::record::get_record))
        .route("/records/{id}", put(handlers::record::update_record))
        .route("/records/{id}", delete(handlers::record::delete_record))
}

/// Liveness.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors_allowed_origins;
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
