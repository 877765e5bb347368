//! File management module for files-manager.
//!
//! This module provides the file resource functionality:
//! - File records (folders, files, images) in a parent/child tree
//! - Blob storage with UUID naming
//! - Ownership and public/private visibility checks

mod metadata;
mod record;
mod service;
mod storage;

pub use metadata::FileRepository;
pub use record::{FileRecord, FileType, NewFileRecord, ParentRef, ROOT_PARENT_ID};
pub use service::{CreateFileRequest, FileContent, FileService};
pub use storage::BlobStorage;

/// Number of records per index page.
pub const PAGE_SIZE: i64 = 20;

/// Default maximum decoded upload size (10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
