//! Neo4j client for reading the movie graph

use super::models::*;
use crate::Config;
use anyhow::{Context, Result};
use neo4rs::{query, ConfigBuilder, Graph, Query};
use std::sync::Arc;

/// Title lookup. `movie.title` is a grouping key of the aggregation, so a
/// title with no matching node produces no row at all.
const MOVIE_WITH_CAST: &str = r#"
    MATCH (movie:Movie {title: $title})
    OPTIONAL MATCH (movie)<-[r]-(person:Person)
    RETURN movie.title AS title,
           collect({
               name: person.name,
               type: type(r),
               roles: r.roles
           }) AS cast
"#;

/// Case-insensitive substring search over movie titles
const MOVIES_MATCHING: &str = r#"
    MATCH (movie:Movie)
    WHERE toLower(movie.title) CONTAINS toLower($title)
    RETURN movie.title AS title,
           movie.released AS released,
           movie.tagline AS tagline,
           movie.votes AS votes
    ORDER BY movie.title
"#;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
    /// Database every query is routed to; `None` uses the server default
    database: Option<String>,
}

impl Neo4jClient {
    /// Create a new Neo4j client backed by a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.neo4j_uri.as_str())
            .user(config.neo4j_user.as_str())
            .password(config.neo4j_password.as_str())
            .max_connections(config.neo4j_max_connections)
            .fetch_size(config.neo4j_fetch_size)
            .build()
            .context("Invalid Neo4j configuration")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to connect to Neo4j")?;

        let database = config.session_database();
        tracing::info!(
            uri = %config.neo4j_uri,
            database = database.as_deref().unwrap_or("<default>"),
            "Neo4j connection pool created"
        );

        Ok(Self {
            graph: Arc::new(graph),
            database,
        })
    }

    /// Execute a parameterized Cypher query and drain its rows.
    ///
    /// The row stream owns a pooled connection; it is dropped before this
    /// returns, whether the drain succeeded or not.
    async fn execute_with_params(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = match self.database.as_deref() {
            Some(db) => self.graph.execute_on(db, q).await?,
            None => self.graph.execute(q).await?,
        };
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    // ========================================================================
    // Movie reads
    // ========================================================================

    /// Get a movie and its cast by exact title
    pub async fn movie_with_cast(&self, title: &str) -> Result<Option<MovieCastRow>> {
        let q = query(MOVIE_WITH_CAST).param("title", title);

        let rows = self
            .execute_with_params(q)
            .await
            .with_context(|| format!("Title lookup failed for {:?}", title))?;

        match rows.first() {
            Some(row) => Ok(Some(
                row.to::<MovieCastRow>()
                    .context("Unexpected title lookup row shape")?,
            )),
            None => Ok(None),
        }
    }

    /// Search movies by case-insensitive title substring
    pub async fn movies_matching(&self, search: &str) -> Result<Vec<MovieSummaryRow>> {
        let q = query(MOVIES_MATCHING).param("title", search);

        let rows = self
            .execute_with_params(q)
            .await
            .with_context(|| format!("Title search failed for {:?}", search))?;

        rows.iter()
            .map(|row| {
                row.to::<MovieSummaryRow>()
                    .context("Unexpected search row shape")
            })
            .collect()
    }

    /// Check connectivity to the configured database
    pub async fn health_check(&self) -> Result<bool> {
        let rows = self.execute_with_params(query("RETURN 1 AS ok")).await?;
        Ok(!rows.is_empty())
    }
}
