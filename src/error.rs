//! Error types for files-manager.

use thiserror::Error;

/// Common error type for files-manager.
///
/// The first group of variants is the request-facing taxonomy of the file
/// resource manager; their `Display` output is the message returned to
/// clients. The second group covers infrastructure failures, which are
/// reported to clients as a generic server error.
#[derive(Error, Debug)]
pub enum FilesError {
    /// Missing, unknown or expired session token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Upload request without a name.
    #[error("Missing name")]
    MissingName,

    /// Upload request whose type is absent or not one of folder/file/image.
    #[error("Missing type")]
    InvalidType,

    /// Non-folder upload request without a payload.
    #[error("Missing data")]
    MissingData,

    /// Payload that is not valid base64.
    #[error("Invalid data")]
    InvalidData,

    /// Decoded payload above the configured upload limit (in bytes).
    #[error("File too large (max {})", size_label(*.0))]
    TooLarge(u64),

    /// Non-root parent id that matches no record.
    #[error("Parent not found")]
    ParentNotFound,

    /// Parent id that references a file or image.
    #[error("Parent is not a folder")]
    ParentNotAFolder,

    /// Record absent, or not visible to the caller.
    #[error("Not found")]
    NotFound,

    /// Content requested for a folder.
    #[error("A folder doesn't have content")]
    NoContent,

    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for user input outside the file taxonomy.
    #[error("{0}")]
    Validation(String),
}

impl FilesError {
    /// Returns true for infrastructure failures (store or disk errors).
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            FilesError::Database(_) | FilesError::Io(_) | FilesError::Config(_)
        )
    }
}

/// Human-readable byte count, rounded up to the largest whole unit.
pub fn size_label(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        format!("{}MB", bytes.div_ceil(MB))
    } else if bytes >= KB {
        format!("{}KB", bytes.div_ceil(KB))
    } else {
        format!("{bytes} bytes")
    }
}

impl From<sqlx::Error> for FilesError {
    fn from(e: sqlx::Error) -> Self {
        FilesError::Database(e.to_string())
    }
}

/// Result type alias for files-manager operations.
pub type Result<T> = std::result::Result<T, FilesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_messages() {
        assert_eq!(FilesError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(FilesError::MissingName.to_string(), "Missing name");
        assert_eq!(FilesError::InvalidType.to_string(), "Missing type");
        assert_eq!(FilesError::MissingData.to_string(), "Missing data");
        assert_eq!(FilesError::ParentNotFound.to_string(), "Parent not found");
        assert_eq!(
            FilesError::ParentNotAFolder.to_string(),
            "Parent is not a folder"
        );
        assert_eq!(FilesError::NotFound.to_string(), "Not found");
        assert_eq!(
            FilesError::NoContent.to_string(),
            "A folder doesn't have content"
        );
    }

    #[test]
    fn test_too_large_display() {
        let err = FilesError::TooLarge(10 * 1024 * 1024);
        assert_eq!(err.to_string(), "File too large (max 10MB)");

        // Limits below a megabyte never render as 0MB
        assert_eq!(
            FilesError::TooLarge(4).to_string(),
            "File too large (max 4 bytes)"
        );
        assert_eq!(
            FilesError::TooLarge(1536).to_string(),
            "File too large (max 2KB)"
        );
    }

    #[test]
    fn test_size_label() {
        assert_eq!(size_label(0), "0 bytes");
        assert_eq!(size_label(1023), "1023 bytes");
        assert_eq!(size_label(1024), "1KB");
        assert_eq!(size_label(1024 * 1024), "1MB");
        assert_eq!(size_label(1024 * 1024 + 1), "2MB");
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = FilesError::Validation("Missing email".to_string());
        assert_eq!(err.to_string(), "Missing email");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FilesError = io_err.into();
        assert!(matches!(err, FilesError::Io(_)));
        assert!(err.is_server_error());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_server_error_classification() {
        assert!(FilesError::Database("gone".into()).is_server_error());
        assert!(FilesError::Config("bad".into()).is_server_error());
        assert!(!FilesError::NotFound.is_server_error());
        assert!(!FilesError::MissingData.is_server_error());
        assert!(!FilesError::Validation("x".into()).is_server_error());
    }
}
