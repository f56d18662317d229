//! External service clients

pub mod sample_catalog;
pub mod tmdb_client;

pub use tmdb_client::{TmdbClient, TmdbError};
