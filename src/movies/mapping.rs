//! Row-to-record mapping for the movie reads

use super::models::{Movie, Person};
use crate::neo4j::models::{CastEntry, MovieCastRow, MovieSummaryRow};

/// Separator between role names of one relationship
const ROLE_SEPARATOR: &str = ", ";

/// Derive the job word from a relationship type: lowercased, cut at the
/// first underscore ("ACTED_IN" -> "acted", "DIRECTED" -> "directed").
pub fn job_from_relationship_type(relationship_type: &str) -> String {
    relationship_type
        .split('_')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Join the roles of one relationship; empty string when there are none.
pub fn join_roles(roles: Option<&[String]>) -> String {
    roles.map(|r| r.join(ROLE_SEPARATOR)).unwrap_or_default()
}

/// Map one collected cast entry.
///
/// Returns `None` for the all-null entry an unmatched `OPTIONAL MATCH`
/// leaves behind.
pub fn map_cast_entry(entry: &CastEntry) -> Option<Person> {
    let relationship_type = entry.relationship_type.as_deref()?;
    Some(Person {
        name: entry.name.clone().unwrap_or_default(),
        job: job_from_relationship_type(relationship_type),
        role: join_roles(entry.roles.as_deref()),
    })
}

/// Map a collected cast list, keeping row order
pub fn map_cast(entries: &[CastEntry]) -> Vec<Person> {
    entries.iter().filter_map(map_cast_entry).collect()
}

impl From<MovieCastRow> for Movie {
    fn from(row: MovieCastRow) -> Self {
        let cast = map_cast(&row.cast);
        Movie::with_cast(row.title, cast)
    }
}

impl From<MovieSummaryRow> for Movie {
    fn from(row: MovieSummaryRow) -> Self {
        Movie::summary(row.title, row.released, row.tagline, row.votes)
    }
}
