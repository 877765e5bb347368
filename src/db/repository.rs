//! User repository for files-manager.

use super::user::{NewUser, User};
use super::DbPool;
use crate::{FilesError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// A duplicate email yields `FilesError::Validation("Already exist")`,
    /// including when two registrations race on the same address.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2)
             RETURNING id, email, password, created_at",
        )
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(FilesError::Validation("Already exist".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
