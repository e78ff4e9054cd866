//! API route definitions

use super::handlers;
use crate::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Static segment takes priority over the title capture
        .route("/movie/search", get(handlers::search_movies))
        .route("/movie/{title}", get(handlers::get_movie_details))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
