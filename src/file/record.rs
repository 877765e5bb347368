//! File record types.

use std::fmt;
use std::str::FromStr;

use crate::FilesError;

/// Parent id meaning "top level".
pub const ROOT_PARENT_ID: i64 = 0;

/// Kind of a file record. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum FileType {
    /// Container for other records; has no bytes.
    Folder,
    /// Regular file.
    File,
    /// Image file.
    Image,
}

impl FileType {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether records of this type carry blob content.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = FilesError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            _ => Err(FilesError::InvalidType),
        }
    }
}

/// A stored file record.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FileRecord {
    /// Unique record ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Record kind.
    pub file_type: FileType,
    /// Whether any authenticated user may read the content.
    pub is_public: bool,
    /// Parent folder ID, or `ROOT_PARENT_ID`.
    pub parent_id: i64,
    /// Blob path; `None` exactly for folders.
    pub local_path: Option<String>,
}

impl FileRecord {
    /// Whether this record is a folder.
    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }

    /// Whether `user_id` may read this record's content.
    pub fn is_readable_by(&self, user_id: i64) -> bool {
        self.is_public || self.user_id == user_id
    }
}

/// Data for inserting a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    /// Owning user ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Record kind.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder ID, or `ROOT_PARENT_ID`.
    pub parent_id: i64,
    /// Blob path for files and images.
    pub local_path: Option<String>,
}

impl NewFileRecord {
    /// A private top-level folder.
    pub fn folder(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type: FileType::Folder,
            is_public: false,
            parent_id: ROOT_PARENT_ID,
            local_path: None,
        }
    }

    /// A private top-level file of the given type stored at `local_path`.
    pub fn blob(
        user_id: i64,
        name: impl Into<String>,
        file_type: FileType,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            is_public: false,
            parent_id: ROOT_PARENT_ID,
            local_path: Some(local_path.into()),
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Set the initial visibility.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Parent reference as supplied by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentRef {
    /// Top level.
    #[default]
    Root,
    /// A record id that should name a folder.
    Id(i64),
    /// Input that cannot name any record.
    Invalid,
}

impl ParentRef {
    /// Interpret a numeric id, mapping the root sentinel to `Root`.
    pub fn from_id(id: i64) -> Self {
        if id == ROOT_PARENT_ID {
            ParentRef::Root
        } else {
            ParentRef::Id(id)
        }
    }

    /// Interpret a textual id such as a query parameter.
    ///
    /// Blank input means root; text that is not an integer is `Invalid`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return ParentRef::Root;
        }
        match raw.parse::<i64>() {
            Ok(id) => Self::from_id(id),
            Err(_) => ParentRef::Invalid,
        }
    }
}
