//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

/// SQLite repository for URL mappings.
///
/// Uniqueness of aliases is enforced by the `UNIQUE` constraint on
/// `url.alias`, so concurrent inserts of the same alias resolve to exactly one
/// winner regardless of arrival order.
pub struct SqliteUrlRepository {
    pool: SqlitePool,
}

impl SqliteUrlRepository {
    /// Creates a repository over an existing pool. Migrations are not run.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `storage_path` and applies
    /// migrations.
    ///
    /// `:memory:` opens a private in-memory database on a single connection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the database cannot be opened and
    /// [`AppError::Migration`] if the schema cannot be applied.
    pub async fn open(storage_path: &str, max_connections: u32) -> Result<Self, AppError> {
        if storage_path == ":memory:" {
            return Self::in_memory().await;
        }

        if let Some(parent) = Path::new(storage_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Storage(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(storage_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repository = Self::new(pool);
        repository.migrate().await?;

        tracing::debug!(storage_path, "storage opened");

        Ok(repository)
    }

    /// Opens a fresh in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that never expires, since every
    /// SQLite in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repository = Self::new(pool);
        repository.migrate().await?;

        Ok(repository)
    }

    /// Applies embedded migrations from `./migrations`.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn save(&self, alias: &str, target: &str) -> Result<String, AppError> {
        let result = sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
            .bind(alias)
            .bind(target)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(alias.to_string()),
            Err(e) if is_unique_violation(&e) => Err(AppError::conflict(
                "Alias already exists",
                json!({ "alias": alias }),
            )),
            Err(e) => Err(AppError::Storage(e)),
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String, AppError> {
        let target: Option<String> = sqlx::query_scalar("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await?;

        target.ok_or_else(|| AppError::not_found("Alias not found", json!({ "alias": alias })))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), AppError> {
        if self.pool.is_closed() {
            return Err(AppError::Storage(sqlx::Error::PoolClosed));
        }

        self.pool.close().await;
        Ok(())
    }
}
