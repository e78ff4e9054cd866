//! GraphStore trait definition
//!
//! Defines the abstract interface for the movie graph reads.
//! This trait mirrors the public read methods of `Neo4jClient`,
//! enabling testing with the in-memory mock.

use crate::neo4j::models::{MovieCastRow, MovieSummaryRow};
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for all graph database operations.
///
/// Every method is read-only. Implementations must release whatever
/// session or pooled connection they acquire before returning, on the
/// error path as well.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Fetch the movie with exactly this title together with every person
    /// related to it. `None` when no `Movie` node carries the title.
    async fn movie_with_cast(&self, title: &str) -> Result<Option<MovieCastRow>>;

    /// Fetch every movie whose title contains `search`, ignoring case.
    async fn movies_matching(&self, search: &str) -> Result<Vec<MovieSummaryRow>>;

    /// Check connectivity with a trivial query
    async fn health_check(&self) -> Result<bool>;
}
