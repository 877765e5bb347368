//! Database schema and migrations for files-manager.

/// Database migrations.
///
/// Each entry is a SQL script executed in order; the schema_version table
/// records which ones have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: file records
    //
    // parent_id 0 is the root sentinel, so it carries no foreign key.
    // local_path is NULL exactly for folders.
    r#"
CREATE TABLE files (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL,
    name        TEXT NOT NULL,
    file_type   TEXT NOT NULL CHECK (file_type IN ('folder', 'file', 'image')),
    is_public   BOOLEAN NOT NULL DEFAULT 0,
    parent_id   INTEGER NOT NULL DEFAULT 0,
    local_path  TEXT,
    CHECK ((file_type = 'folder') = (local_path IS NULL))
);

CREATE INDEX idx_files_owner_parent ON files(user_id, parent_id, id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
        assert!(MIGRATIONS.iter().all(|m| !m.trim().is_empty()));
    }
}
