//! Movie and cast records served by the API

use serde::{Deserialize, Serialize};

/// A person credited on a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Lowercased first word of the relationship type ("acted", "directed")
    pub job: String,
    /// Comma-separated roles played; empty when the relationship has none
    pub role: String,
}

/// A movie as returned by the API.
///
/// Which fields are populated depends on the read that produced the value:
/// a title lookup fills `title` and `cast` only, a search fills `title`,
/// `released`, `tagline` and `votes` only. Absent fields are left out of
/// the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<Person>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,
}

impl Movie {
    /// Title lookup shape: title and cast
    pub fn with_cast(title: String, cast: Vec<Person>) -> Self {
        Self {
            title,
            cast: Some(cast),
            released: None,
            tagline: None,
            votes: None,
        }
    }

    /// Search shape: title and metadata, no cast
    pub fn summary(
        title: String,
        released: Option<i64>,
        tagline: Option<String>,
        votes: Option<i64>,
    ) -> Self {
        Self {
            title,
            cast: None,
            released,
            tagline,
            votes,
        }
    }
}
