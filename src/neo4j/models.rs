//! Row shapes returned by the movie graph queries
//!
//! These mirror the Cypher `RETURN` clauses one-to-one and are deserialized
//! straight from `neo4rs::Row`. Turning them into API records is the job of
//! [`crate::movies::mapping`].

use serde::{Deserialize, Serialize};

// ============================================================================
// Title lookup
// ============================================================================

/// One entry of the `collect(...)` cast list of a title lookup.
///
/// Every field is optional: when the `OPTIONAL MATCH` finds no person the
/// collected map still exists but carries nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub name: Option<String>,
    /// Raw relationship type, e.g. `ACTED_IN`
    #[serde(rename = "type")]
    pub relationship_type: Option<String>,
    /// The `roles` list property of the relationship, if set
    pub roles: Option<Vec<String>>,
}

/// Row produced by the title lookup query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCastRow {
    pub title: String,
    #[serde(default)]
    pub cast: Vec<CastEntry>,
}

// ============================================================================
// Search
// ============================================================================

/// Row produced by the title search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummaryRow {
    pub title: String,
    pub released: Option<i64>,
    pub tagline: Option<String>,
    pub votes: Option<i64>,
}
