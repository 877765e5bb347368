//! Middleware for Web API.

pub mod auth;

pub use auth::{AuthUser, TOKEN_HEADER};
