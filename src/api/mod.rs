//! HTTP API for the movie graph

pub mod handlers;
pub mod routes;

pub use routes::create_router;
