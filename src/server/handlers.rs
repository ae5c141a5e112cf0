//! HTTP route handlers
//!
//! - GET  /posts     - List all posts, newest first
//! - GET  /posts/:id - Get one post
//! - POST /posts     - Create a post
//! - GET  /health    - Liveness check

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::error::ApiError;
use crate::server::AppState;
use crate::storage::{BlogPost, NewPost};

/// Create post request
///
/// Any `id` or `created_at` in the body is ignored; both are assigned by
/// storage.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// List all posts
///
/// GET /posts
#[instrument(skip(state))]
pub async fn list_posts(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state.storage.list_posts().await?;
    info!(count = posts.len(), "Listed posts");
    Ok(Json(posts))
}

/// Get a post by id
///
/// GET /posts/:id
#[instrument(skip(state))]
pub async fn get_post(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let id: i64 = raw_id.parse().map_err(|_| {
        warn!(id = %raw_id, "Rejected non-integer post id");
        ApiError::MalformedRequest(format!("Post id must be an integer, got '{}'", raw_id))
    })?;

    match state.storage.get_post(id).await? {
        Some(post) => Ok(Json(post)),
        None => {
            info!(id, "Post not found");
            Err(ApiError::NotFound(format!("Post {} not found", id)))
        }
    }
}

/// Create a post
///
/// POST /posts
/// Body: {"title": "...", "content": "...", "author": "..."}
#[instrument(skip(state, payload))]
pub async fn create_post(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let new_post = NewPost::new(request.title, request.content, request.author)?;

    let created = state.storage.insert_post(new_post).await?;
    info!(id = created.id, author = %created.author, "Post created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Health check
pub async fn health_check() -> Response {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}
