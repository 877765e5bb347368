//! File metadata repository.

use super::record::{FileRecord, NewFileRecord};
use crate::db::DbPool;
use crate::Result;

const FILE_COLUMNS: &str = "id, user_id, name, file_type, is_public, parent_id, local_path";

/// Repository for file record operations.
///
/// Every method is a single statement, so each call is atomic on its own.
pub struct FileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FileRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a record and return it with its assigned id.
    pub async fn create(&self, file: &NewFileRecord) -> Result<FileRecord> {
        let sql = format!(
            "INSERT INTO files (user_id, name, file_type, is_public, parent_id, local_path)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {FILE_COLUMNS}"
        );

        let record = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(file.user_id)
            .bind(&file.name)
            .bind(file.file_type)
            .bind(file.is_public)
            .bind(file.parent_id)
            .bind(&file.local_path)
            .fetch_one(self.pool)
            .await?;

        Ok(record)
    }

    /// Get a record by id, whoever owns it.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>> {
        let sql = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1");

        let record = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(record)
    }

    /// Get a record by id only if `user_id` owns it.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<Option<FileRecord>> {
        let sql = format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1 AND user_id = $2");

        let record = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(record)
    }

    /// List a user's records under `parent_id`, in insertion order.
    pub async fn list_by_parent(
        &self,
        user_id: i64,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>> {
        let sql = format!(
            "SELECT {FILE_COLUMNS} FROM files
             WHERE user_id = $1 AND parent_id = $2
             ORDER BY id ASC
             LIMIT $3 OFFSET $4"
        );

        let records = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(user_id)
            .bind(parent_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    /// Set the visibility of a record owned by `user_id`.
    ///
    /// Locates and updates in one statement; returns `None` when no record
    /// matches both id and owner.
    pub async fn set_public(
        &self,
        id: i64,
        user_id: i64,
        is_public: bool,
    ) -> Result<Option<FileRecord>> {
        let sql = format!(
            "UPDATE files SET is_public = $1
             WHERE id = $2 AND user_id = $3
             RETURNING {FILE_COLUMNS}"
        );

        let record = sqlx::query_as::<_, FileRecord>(&sql)
            .bind(is_public)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(record)
    }

    /// Count all records.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::record::{FileType, ROOT_PARENT_ID};
    use crate::Database;

    #[tokio::test]
    async fn test_create_folder_and_blob() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        let folder = repo.create(&NewFileRecord::folder(1, "docs")).await.unwrap();
        assert!(folder.id > 0);
        assert_eq!(folder.file_type, FileType::Folder);
        assert_eq!(folder.parent_id, ROOT_PARENT_ID);
        assert!(!folder.is_public);
        assert!(folder.local_path.is_none());

        let file = repo
            .create(
                &NewFileRecord::blob(1, "a.txt", FileType::File, "/tmp/blob")
                    .with_parent(folder.id)
                    .with_public(true),
            )
            .await
            .unwrap();
        assert_eq!(file.parent_id, folder.id);
        assert!(file.is_public);
        assert_eq!(file.local_path.as_deref(), Some("/tmp/blob"));
    }

    #[tokio::test]
    async fn test_folder_with_path_rejected() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        let mut bad = NewFileRecord::folder(1, "docs");
        bad.local_path = Some("/tmp/nope".to_string());
        assert!(repo.create(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_get_by_id_and_owned() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        let record = repo.create(&NewFileRecord::folder(1, "docs")).await.unwrap();

        assert_eq!(repo.get_by_id(record.id).await.unwrap(), Some(record.clone()));
        assert_eq!(
            repo.get_owned(record.id, 1).await.unwrap(),
            Some(record.clone())
        );
        assert!(repo.get_owned(record.id, 2).await.unwrap().is_none());
        assert!(repo.get_by_id(record.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_parent_pagination() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        let mut ids = Vec::new();
        for i in 0..5 {
            let r = repo
                .create(&NewFileRecord::folder(1, format!("f{i}")))
                .await
                .unwrap();
            ids.push(r.id);
        }
        // Other owner and other parent are filtered out
        repo.create(&NewFileRecord::folder(2, "other")).await.unwrap();
        repo.create(&NewFileRecord::folder(1, "nested").with_parent(ids[0]))
            .await
            .unwrap();

        let first = repo.list_by_parent(1, ROOT_PARENT_ID, 0, 2).await.unwrap();
        let second = repo.list_by_parent(1, ROOT_PARENT_ID, 2, 2).await.unwrap();
        let third = repo.list_by_parent(1, ROOT_PARENT_ID, 4, 2).await.unwrap();
        let beyond = repo.list_by_parent(1, ROOT_PARENT_ID, 6, 2).await.unwrap();

        let listed: Vec<i64> = first
            .iter()
            .chain(&second)
            .chain(&third)
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, ids);
        assert!(beyond.is_empty());

        let nested = repo.list_by_parent(1, ids[0], 0, 20).await.unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name, "nested");
    }

    #[tokio::test]
    async fn test_set_public() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        let record = repo.create(&NewFileRecord::folder(1, "docs")).await.unwrap();

        let published = repo.set_public(record.id, 1, true).await.unwrap().unwrap();
        assert!(published.is_public);
        assert_eq!(published.name, record.name);

        let unpublished = repo.set_public(record.id, 1, false).await.unwrap().unwrap();
        assert!(!unpublished.is_public);

        // Non-owner cannot toggle
        assert!(repo.set_public(record.id, 2, true).await.unwrap().is_none());
        let stored = repo.get_by_id(record.id).await.unwrap().unwrap();
        assert!(!stored.is_public);
    }

    #[tokio::test]
    async fn test_count() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = FileRepository::new(db.pool());

        assert_eq!(repo.count().await.unwrap(), 0);
        repo.create(&NewFileRecord::folder(1, "a")).await.unwrap();
        repo.create(&NewFileRecord::folder(2, "b")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
    }
}
