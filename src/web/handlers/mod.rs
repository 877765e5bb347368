//! API handlers for files-manager.

pub mod app;
pub mod auth;
pub mod files;
pub mod users;

pub use app::*;
pub use auth::*;
pub use files::*;
pub use users::*;

use std::sync::Arc;

use crate::auth::SessionManager;
use crate::file::{BlobStorage, FileService, DEFAULT_MAX_FILE_SIZE};
use crate::Database;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Metadata database.
    pub db: Arc<Database>,
    /// Blob storage root.
    pub storage: BlobStorage,
    /// Session tokens.
    pub sessions: SessionManager,
    /// Maximum decoded upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>, storage: BlobStorage, sessions: SessionManager) -> Self {
        Self {
            db,
            storage,
            sessions,
            max_upload_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set the maximum decoded upload size in bytes.
    pub fn with_max_upload_size(mut self, max_upload_size: u64) -> Self {
        self.max_upload_size = max_upload_size;
        self
    }

    /// File service bound to this state.
    pub fn file_service(&self) -> FileService<'_> {
        FileService::new(&self.db, &self.storage).with_max_file_size(self.max_upload_size)
    }
}
