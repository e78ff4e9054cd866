//! `GraphStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::*;
use super::traits::GraphStore;

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn movie_with_cast(&self, title: &str) -> anyhow::Result<Option<MovieCastRow>> {
        self.movie_with_cast(title).await
    }

    async fn movies_matching(&self, search: &str) -> anyhow::Result<Vec<MovieSummaryRow>> {
        self.movies_matching(search).await
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
