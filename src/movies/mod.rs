//! Movie records and the repository that reads them from the graph

pub mod mapping;
pub mod models;
pub mod repository;

pub use models::{Movie, Person};
pub use repository::MovieRepository;
