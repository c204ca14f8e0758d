//! Haven API crate - axum HTTP server and route handlers.
//!
//! Exposes the coaching conversation and the four preference-driven
//! tools over JSON, plus an unauthenticated health check.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
