//! Movie repository: the two read operations behind the API

use super::models::Movie;
use crate::neo4j::GraphStore;
use anyhow::Result;
use std::sync::Arc;

/// Path browsers request on their own against a bare-path route.
/// Looking it up as a title would only cost a query.
const FAVICON_PATH: &str = "favicon.ico";

/// Read access to movies, mapped from graph rows into [`Movie`] records
#[derive(Clone)]
pub struct MovieRepository {
    store: Arc<dyn GraphStore>,
}

impl MovieRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Find a movie by exact title, with its cast.
    ///
    /// `Ok(None)` when no movie has this title. Store failures are
    /// propagated unchanged.
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Movie>> {
        if title == FAVICON_PATH {
            return Ok(None);
        }

        tracing::debug!(title, "Looking up movie");
        let movie = self.store.movie_with_cast(title).await?.map(Movie::from);
        if movie.is_none() {
            tracing::debug!(title, "No movie with this title");
        }
        Ok(movie)
    }

    /// Search movies whose title contains `search`, ignoring case.
    ///
    /// Results carry title, release year, tagline and votes, never a cast.
    pub async fn search(&self, search: &str) -> Result<Vec<Movie>> {
        tracing::debug!(search, "Searching movies");
        let rows = self.store.movies_matching(search).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    /// Whether the underlying store answers
    pub async fn is_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!(error = %e, "Graph store health check failed");
                false
            }
        }
    }
}
