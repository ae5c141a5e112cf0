//! HTTP routes definition

use axum::{routing::get, Router};

use super::handlers;

/// Blog post routes
///
/// - GET  /posts     - List all posts
/// - POST /posts     - Create a post
/// - GET  /posts/:id - Get a post by id
pub fn post_routes() -> Router {
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/posts/:id", get(handlers::get_post))
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(handlers::health_check))
}
