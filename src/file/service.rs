//! File service for files-manager.
//!
//! This module provides the file resource operations:
//! - Create folders, files and images (with blob write)
//! - Show and paginated index scoped to the owner
//! - Publish / unpublish
//! - Content retrieval with visibility checks

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::{FilesError, Result};

use super::metadata::FileRepository;
use super::record::{FileRecord, FileType, NewFileRecord, ParentRef, ROOT_PARENT_ID};
use super::storage::BlobStorage;
use super::{DEFAULT_MAX_FILE_SIZE, PAGE_SIZE};

/// Standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Request data for creating a file record.
#[derive(Debug, Clone, Default)]
pub struct CreateFileRequest {
    /// Display name.
    pub name: Option<String>,
    /// Raw type string, checked against folder/file/image.
    pub file_type: Option<String>,
    /// Parent folder.
    pub parent: ParentRef,
    /// Initial visibility.
    pub is_public: bool,
    /// Base64 payload for files and images.
    pub data: Option<String>,
}

impl CreateFileRequest {
    /// A folder request at root.
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(FileType::Folder.as_str().to_string()),
            ..Default::default()
        }
    }

    /// A file or image request at root with a base64 payload.
    pub fn blob(name: impl Into<String>, file_type: FileType, data: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.as_str().to_string()),
            data: Some(data.into()),
            ..Default::default()
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = parent;
        self
    }

    /// Set the initial visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Content of a file or image together with its record.
#[derive(Debug)]
pub struct FileContent {
    /// The record the bytes belong to.
    pub record: FileRecord,
    /// MIME type derived from the record name.
    pub content_type: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

/// Validated create request, ready to be applied.
struct ValidCreate {
    name: String,
    file_type: FileType,
    parent_id: i64,
    is_public: bool,
    payload: Option<Vec<u8>>,
}

/// File service coordinating metadata and blob storage.
pub struct FileService<'a> {
    db: &'a Database,
    storage: &'a BlobStorage,
    max_file_size: u64,
}

impl<'a> FileService<'a> {
    /// Create a new FileService.
    pub fn new(db: &'a Database, storage: &'a BlobStorage) -> Self {
        Self {
            db,
            storage,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a new FileService with a custom max file size in bytes.
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Create a folder, file or image owned by `user_id`.
    ///
    /// # Validation
    /// In order: name, type, data presence, parent, payload encoding and
    /// size. Nothing is written before every check has passed.
    ///
    /// # Effects
    /// Folders insert a record only. Files and images write the blob first,
    /// then insert the record; the blob is removed again if the insert fails.
    pub async fn create(&self, user_id: i64, request: CreateFileRequest) -> Result<FileRecord> {
        let valid = self.validate_create(user_id, request).await?;
        let repo = FileRepository::new(self.db.pool());

        let Some(payload) = valid.payload else {
            let new = NewFileRecord::folder(user_id, valid.name)
                .with_parent(valid.parent_id)
                .with_public(valid.is_public);
            let record = repo.create(&new).await?;
            info!(user_id, file_id = record.id, "Folder created");
            return Ok(record);
        };

        let path = self.storage.save(&payload).await?;
        let local_path = path.to_string_lossy().into_owned();
        let new = NewFileRecord::blob(user_id, valid.name, valid.file_type, local_path)
            .with_parent(valid.parent_id)
            .with_public(valid.is_public);

        match repo.create(&new).await {
            Ok(record) => {
                info!(
                    user_id,
                    file_id = record.id,
                    file_type = %record.file_type,
                    size = payload.len(),
                    "File created"
                );
                Ok(record)
            }
            Err(e) => {
                warn!(user_id, error = %e, "Insert failed, removing blob");
                if let Err(cleanup) = self.storage.remove(&path).await {
                    warn!(path = %path.display(), error = %cleanup, "Blob cleanup failed");
                }
                Err(e)
            }
        }
    }

    async fn validate_create(&self, user_id: i64, request: CreateFileRequest) -> Result<ValidCreate> {
        let name = request
            .name
            .filter(|n| !n.is_empty())
            .ok_or(FilesError::MissingName)?;

        let file_type: FileType = request
            .file_type
            .as_deref()
            .ok_or(FilesError::InvalidType)?
            .parse()?;

        let data = request.data.filter(|d| !d.is_empty());
        if file_type.has_content() && data.is_none() {
            return Err(FilesError::MissingData);
        }

        let parent_id = self.resolve_parent(user_id, request.parent).await?;

        let payload = match data {
            Some(data) if file_type.has_content() => Some(self.decode_payload(&data)?),
            _ => None,
        };

        Ok(ValidCreate {
            name,
            file_type,
            parent_id,
            is_public: request.is_public,
            payload,
        })
    }

    /// Check that a non-root parent exists and is a folder.
    ///
    /// The parent is looked up by id alone; it need not belong to the caller.
    async fn resolve_parent(&self, user_id: i64, parent: ParentRef) -> Result<i64> {
        let id = match parent {
            ParentRef::Root => return Ok(ROOT_PARENT_ID),
            ParentRef::Invalid => return Err(FilesError::ParentNotFound),
            ParentRef::Id(id) => id,
        };

        let repo = FileRepository::new(self.db.pool());
        let record = repo.get_by_id(id).await?.ok_or_else(|| {
            debug!(user_id, parent_id = id, "Parent not found");
            FilesError::ParentNotFound
        })?;

        if !record.is_folder() {
            return Err(FilesError::ParentNotAFolder);
        }
        Ok(record.id)
    }

    fn decode_payload(&self, data: &str) -> Result<Vec<u8>> {
        let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = PAYLOAD_ENGINE
            .decode(compact)
            .map_err(|_| FilesError::InvalidData)?;

        if bytes.len() as u64 > self.max_file_size {
            return Err(FilesError::TooLarge(self.max_file_size));
        }
        Ok(bytes)
    }

    /// Get a record owned by `user_id`.
    ///
    /// Public records of other users are not visible here.
    pub async fn show(&self, user_id: i64, id: i64) -> Result<FileRecord> {
        FileRepository::new(self.db.pool())
            .get_owned(id, user_id)
            .await?
            .ok_or(FilesError::NotFound)
    }

    /// List one page of `user_id`'s records under `parent`.
    ///
    /// Pages hold `PAGE_SIZE` records in insertion order. Negative pages
    /// are treated as page 0; an invalid parent matches nothing.
    pub async fn index(&self, user_id: i64, parent: ParentRef, page: i64) -> Result<Vec<FileRecord>> {
        let parent_id = match parent {
            ParentRef::Root => ROOT_PARENT_ID,
            ParentRef::Id(id) => id,
            ParentRef::Invalid => return Ok(Vec::new()),
        };
        let offset = page.max(0).saturating_mul(PAGE_SIZE);

        FileRepository::new(self.db.pool())
            .list_by_parent(user_id, parent_id, offset, PAGE_SIZE)
            .await
    }

    /// Make a record owned by `user_id` public.
    pub async fn publish(&self, user_id: i64, id: i64) -> Result<FileRecord> {
        self.set_public(user_id, id, true).await
    }

    /// Make a record owned by `user_id` private.
    pub async fn unpublish(&self, user_id: i64, id: i64) -> Result<FileRecord> {
        self.set_public(user_id, id, false).await
    }

    async fn set_public(&self, user_id: i64, id: i64, is_public: bool) -> Result<FileRecord> {
        let record = FileRepository::new(self.db.pool())
            .set_public(id, user_id, is_public)
            .await?
            .ok_or(FilesError::NotFound)?;

        info!(user_id, file_id = id, is_public, "Visibility changed");
        Ok(record)
    }

    /// Read the content of a record visible to `user_id`.
    ///
    /// Private records of other users and blobs missing from disk are both
    /// reported as `NotFound`.
    pub async fn content(&self, user_id: i64, id: i64) -> Result<FileContent> {
        let record = FileRepository::new(self.db.pool())
            .get_by_id(id)
            .await?
            .filter(|r| r.is_readable_by(user_id))
            .ok_or(FilesError::NotFound)?;

        if record.is_folder() {
            return Err(FilesError::NoContent);
        }

        let path = record.local_path.as_deref().ok_or(FilesError::NotFound)?;
        let bytes = match self.storage.read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(file_id = id, path, error = %e, "Blob unreadable");
                return Err(FilesError::NotFound);
            }
        };

        let content_type = mime_guess::from_path(&record.name)
            .first_or_octet_stream()
            .to_string();

        Ok(FileContent {
            record,
            content_type,
            bytes,
        })
    }
}
