//! # larke-api
//!
//! HTTP layer for Larke built on Axum.
//!
//! Provides the login-type guard middleware, route permission checks, the
//! permission endpoints, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
