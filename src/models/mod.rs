//! Data models for dramaboard

pub mod drama;
pub mod interaction;

pub use drama::{Character, Drama, DramaDetail};
pub use interaction::{TitleStats, User};
