//! Persistence contract for alias → URL mappings.

use crate::error::AppError;
use async_trait::async_trait;

/// Durable storage of URL mappings.
///
/// The repository is the only place durable writes happen and the single point
/// of mutual exclusion between concurrent requests: implementations must make
/// concurrent `save`/`get_url` calls safe. There is no caching layer; every
/// read hits storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Atomically inserts a mapping and returns its alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already present; state is
    /// left untouched in that case.
    ///
    /// Returns [`AppError::Storage`] on any lower-level fault.
    async fn save(&self, alias: &str, target: &str) -> Result<String, AppError>;

    /// Looks up the target URL for an alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists for `alias`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_url(&self, alias: &str) -> Result<String, AppError>;

    /// Cheap round-trip to storage, used by the health endpoint.
    async fn health_check(&self) -> Result<(), AppError>;

    /// Releases the underlying resources.
    ///
    /// Called once during shutdown. Not required to be idempotent.
    async fn close(&self) -> Result<(), AppError>;
}
