//! files-manager - a token-authenticated file manager backend
//!
//! Clients register, open a session, then create folders and upload files
//! and images (stored on local disk, indexed in SQLite), browse their tree,
//! toggle public visibility and download content.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{hash_password, verify_password, PasswordError, SessionManager, TokenStore};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{FilesError, Result};
pub use file::{
    BlobStorage, CreateFileRequest, FileContent, FileRecord, FileRepository, FileService,
    FileType, ParentRef,
};
pub use web::{AppState, WebServer};
