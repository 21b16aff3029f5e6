//! PostgreSQL user repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use peerfeed_core::error::{AppError, ErrorKind};
use peerfeed_core::result::AppResult;
use peerfeed_entity::{PendingAccount, User};

use super::UserRepository;

/// Repository for user CRUD and query operations backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($2)",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find user by username or email",
                e,
            )
        })
    }

    async fn create(&self, pending: &PendingAccount) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, full_name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&pending.username)
        .bind(&pending.email)
        .bind(&pending.full_name)
        .bind(&pending.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("users_username_key") =>
            {
                AppError::duplicate_account(format!(
                    "Username '{}' already exists",
                    pending.username
                ))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::duplicate_account("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn set_refresh_token(
        &self,
        username_or_email: &str,
        token: Option<&str>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET refresh_token = $2, updated_at = NOW() \
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1) \
             RETURNING *",
        )
        .bind(username_or_email)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set refresh token", e)
        })?
        .ok_or_else(|| AppError::account_not_found(format!("User {username_or_email} not found")))
    }

    async fn find_by_refresh_token(&self, username: &str, token: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(username) = LOWER($1) AND refresh_token = $2",
        )
        .bind(username)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by refresh token", e)
        })
    }

    async fn set_recovery_key(&self, email: &str, key: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET recovery_key = $2, updated_at = NOW() \
             WHERE LOWER(email) = LOWER($1) RETURNING *",
        )
        .bind(email)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set recovery key", e))?
        .ok_or_else(|| AppError::account_not_found(format!("No account with email {email}")))
    }

    async fn consume_recovery_key(
        &self,
        email: &str,
        key: &str,
        new_password_hash: &str,
    ) -> AppResult<()> {
        // Key comparison, credential overwrite, and key clearing happen in
        // one statement so the key cannot be consumed twice.
        let result = sqlx::query(
            "UPDATE users SET password_hash = $3, recovery_key = NULL, updated_at = NOW() \
             WHERE LOWER(email) = LOWER($1) AND recovery_key = $2",
        )
        .bind(email)
        .bind(key)
        .bind(new_password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to consume recovery key", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::invalid_recovery_key("Recovery key is invalid"));
        }
        Ok(())
    }

    async fn set_active(&self, username_or_email: &str, active: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = NOW() \
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1) \
             RETURNING *",
        )
        .bind(username_or_email)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set active flag", e))?
        .ok_or_else(|| AppError::account_not_found(format!("User {username_or_email} not found")))
    }
}
