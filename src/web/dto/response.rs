//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::User;
use crate::file::FileRecord;

/// File record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// Record ID.
    pub id: i64,
    /// Owner ID.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// `folder`, `file` or `image`.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Visibility.
    pub is_public: bool,
    /// Parent folder ID, `0` for root.
    pub parent_id: i64,
    /// Blob path; omitted for folders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            file_type: record.file_type.as_str().to_string(),
            is_public: record.is_public,
            parent_id: record.parent_id,
            local_path: record.local_path,
        }
    }
}

/// Public user information.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Login email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Session token issued by `/connect`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Session token for the `X-Token` header.
    pub token: String,
}

/// Backend liveness.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Token store liveness.
    pub redis: bool,
    /// Metadata database liveness.
    pub db: bool,
}

/// Object counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Registered users.
    pub users: i64,
    /// File records of every type.
    pub files: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::{FileType, ROOT_PARENT_ID};
    use serde_json::json;

    #[test]
    fn test_folder_response_omits_local_path() {
        let record = FileRecord {
            id: 4,
            user_id: 1,
            name: "docs".to_string(),
            file_type: FileType::Folder,
            is_public: false,
            parent_id: ROOT_PARENT_ID,
            local_path: None,
        };

        let json = serde_json::to_value(FileResponse::from(record)).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 4,
                "userId": 1,
                "name": "docs",
                "type": "folder",
                "isPublic": false,
                "parentId": 0
            })
        );
    }

    #[test]
    fn test_file_response_has_local_path() {
        let record = FileRecord {
            id: 5,
            user_id: 1,
            name: "a.txt".to_string(),
            file_type: FileType::File,
            is_public: true,
            parent_id: 4,
            local_path: Some("/tmp/files_manager/abc".to_string()),
        };

        let json = serde_json::to_value(FileResponse::from(record)).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["isPublic"], true);
        assert_eq!(json["parentId"], 4);
        assert_eq!(json["localPath"], "/tmp/files_manager/abc");
    }
}
