//! HTTP API handlers for dramaboard
//!
//! JSON endpoints under `/api/*` plus the server-rendered HTML pages in `ui`.

pub mod dramas;
pub mod health;
pub mod interactions;
pub mod stats;
pub mod ui;

pub use dramas::drama_routes;
pub use health::health_routes;
pub use interactions::interaction_routes;
pub use stats::stats_routes;
pub use ui::ui_routes;
