//! Web API module for files-manager.
//!
//! This module provides the HTTP interface: token-authenticated file
//! routes, user and session routes, and status endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_health_router, create_router};
pub use server::WebServer;
