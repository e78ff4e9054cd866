//! API request handlers

use crate::movies::Movie;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Health check
// ============================================================================

/// Per-service health status in the health response
#[derive(Serialize)]
pub struct ServiceHealthStatus {
    pub neo4j: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<ServiceHealthStatus>,
}

/// Health check handler: verifies actual connectivity to Neo4j.
///
/// Returns:
/// - 200 + `"ok"` if Neo4j answers
/// - 503 + `"unhealthy"` otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let neo4j_ok = state.movies.is_healthy().await;

    let (http_status, status) = if neo4j_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: Some(ServiceHealthStatus {
                neo4j: if neo4j_ok {
                    "connected".to_string()
                } else {
                    "disconnected".to_string()
                },
            }),
        }),
    )
}

// ============================================================================
// Movies
// ============================================================================

/// GET /movie/{title}: a movie and its cast, 404 when unknown
pub async fn get_movie_details(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Movie>, AppError> {
    let movie = state
        .movies
        .find_by_title(&title)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(movie))
}

/// Query parameters for movie search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Title substring; missing means "match everything"
    #[serde(default)]
    pub q: String,
}

/// GET /movie/search?q=: movies whose title contains `q`
pub async fn search_movies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = state.movies.search(&query.q).await?;
    Ok(Json(movies))
}

// ============================================================================
// Errors
// ============================================================================

/// API error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    /// Rendered as a bare 404 with an empty body
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Internal(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Request failed");
                let body = Json(serde_json::json!({
                    "error": format!("{:#}", e)
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
