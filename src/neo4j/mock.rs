//! In-memory mock implementation of GraphStore for testing.
//!
//! Holds a tiny movie graph in `tokio::sync::RwLock` collections and answers
//! the two reads the way the Cypher queries do. Also counts calls and read
//! scopes so tests can assert that nothing reached the store, or that every
//! scope was released. Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::traits::GraphStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// A `Movie` node
#[derive(Debug, Clone, Default)]
pub struct MockMovie {
    pub title: String,
    pub released: Option<i64>,
    pub tagline: Option<String>,
    pub votes: Option<i64>,
}

/// A `(Person)-[type {roles}]->(Movie)` relationship
#[derive(Debug, Clone)]
pub struct MockRelationship {
    pub person: String,
    pub relationship_type: String,
    pub movie: String,
    pub roles: Option<Vec<String>>,
}

/// In-memory mock implementation of GraphStore for testing.
pub struct MockGraphStore {
    pub movies: RwLock<BTreeMap<String, MockMovie>>,
    pub relationships: RwLock<Vec<MockRelationship>>,

    /// When set, every read fails with this message after opening its scope
    pub failure: RwLock<Option<String>>,

    calls: AtomicUsize,
    scopes_opened: AtomicUsize,
    scopes_released: AtomicUsize,
}

/// Stand-in for a driver session: counted on open, counted again on drop.
struct ReadScope<'a> {
    store: &'a MockGraphStore,
}

impl<'a> ReadScope<'a> {
    fn open(store: &'a MockGraphStore) -> Self {
        store.scopes_opened.fetch_add(1, Ordering::SeqCst);
        Self { store }
    }
}

impl Drop for ReadScope<'_> {
    fn drop(&mut self) {
        self.store.scopes_released.fetch_add(1, Ordering::SeqCst);
    }
}

impl MockGraphStore {
    /// Create a new empty MockGraphStore.
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(BTreeMap::new()),
            relationships: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
            calls: AtomicUsize::new(0),
            scopes_opened: AtomicUsize::new(0),
            scopes_released: AtomicUsize::new(0),
        }
    }

    /// Add (or replace) a movie node
    pub async fn add_movie(&self, movie: MockMovie) {
        self.movies.write().await.insert(movie.title.clone(), movie);
    }

    /// Relate a person to a movie
    pub async fn relate(
        &self,
        person: &str,
        relationship_type: &str,
        movie: &str,
        roles: Option<&[&str]>,
    ) {
        self.relationships.write().await.push(MockRelationship {
            person: person.to_string(),
            relationship_type: relationship_type.to_string(),
            movie: movie.to_string(),
            roles: roles.map(|r| r.iter().map(|s| s.to_string()).collect()),
        });
    }

    /// Make every subsequent read fail
    pub async fn fail_with(&self, message: &str) {
        *self.failure.write().await = Some(message.to_string());
    }

    /// Number of reads issued against the store
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of read scopes that were opened and not yet released
    pub fn open_scopes(&self) -> usize {
        self.scopes_opened.load(Ordering::SeqCst) - self.scopes_released.load(Ordering::SeqCst)
    }

    /// Number of read scopes ever opened
    pub fn scopes_opened(&self) -> usize {
        self.scopes_opened.load(Ordering::SeqCst)
    }

    async fn begin_read(&self) -> Result<ReadScope<'_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scope = ReadScope::open(self);
        if let Some(message) = self.failure.read().await.as_ref() {
            return Err(anyhow!("{}", message));
        }
        Ok(scope)
    }
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn movie_with_cast(&self, title: &str) -> Result<Option<MovieCastRow>> {
        let _scope = self.begin_read().await?;

        let movies = self.movies.read().await;
        let Some(movie) = movies.get(title) else {
            return Ok(None);
        };

        let cast: Vec<CastEntry> = self
            .relationships
            .read()
            .await
            .iter()
            .filter(|r| r.movie == movie.title)
            .map(|r| CastEntry {
                name: Some(r.person.clone()),
                relationship_type: Some(r.relationship_type.clone()),
                roles: r.roles.clone(),
            })
            .collect();

        // OPTIONAL MATCH with no hit still collects one all-null map
        let cast = if cast.is_empty() {
            vec![CastEntry::default()]
        } else {
            cast
        };

        Ok(Some(MovieCastRow {
            title: movie.title.clone(),
            cast,
        }))
    }

    async fn movies_matching(&self, search: &str) -> Result<Vec<MovieSummaryRow>> {
        let _scope = self.begin_read().await?;

        let needle = search.to_lowercase();
        Ok(self
            .movies
            .read()
            .await
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .map(|m| MovieSummaryRow {
                title: m.title.clone(),
                released: m.released,
                tagline: m.tagline.clone(),
                votes: m.votes,
            })
            .collect())
    }

    async fn health_check(&self) -> Result<bool> {
        let _scope = self.begin_read().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_movie_without_people_collects_null_entry() {
        let store = MockGraphStore::new();
        store
            .add_movie(MockMovie {
                title: "Lonely".into(),
                ..Default::default()
            })
            .await;

        let row = store.movie_with_cast("Lonely").await.unwrap().unwrap();
        assert_eq!(row.cast, vec![CastEntry::default()]);
    }

    #[tokio::test]
    async fn test_failure_still_releases_scope() {
        let store = MockGraphStore::new();
        store.fail_with("connection refused").await;

        assert!(store.movies_matching("x").await.is_err());
        assert_eq!(store.scopes_opened(), 1);
        assert_eq!(store.open_scopes(), 0);
    }
}
