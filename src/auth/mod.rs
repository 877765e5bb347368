//! Authentication module for files-manager.
//!
//! This module provides password hashing, Basic credential parsing and
//! session token management.

mod basic;
mod password;
mod session;

pub use basic::{parse_basic_credentials, BasicCredentials};
pub use password::{hash_password, verify_password, PasswordError};
pub use session::{
    auth_key, SessionManager, TokenStore, AUTH_KEY_PREFIX, DEFAULT_SESSION_DURATION_SECS,
};
